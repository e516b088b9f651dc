//! Help command handler

use std::sync::Arc;
use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;
use crate::i18n::I18n;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, i18n: Arc<I18n>) -> Result<()> {
    bot.send_message(msg.chat.id, i18n.t("commands.help.text", None)).await?;
    Ok(())
}
