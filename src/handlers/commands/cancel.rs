//! Cancel command handler

use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::handlers::{keyboards::send_reply, sender};
use crate::state::DialogController;
use crate::utils::errors::Result;

/// Handle /cancel command, abandoning the entry in progress
pub async fn handle_cancel(bot: Bot, msg: Message, controller: DialogController) -> Result<()> {
    let user_id = sender(&msg)?.id.0 as i64;
    let step = controller.step(user_id).await;
    debug!(user_id = user_id, step = %step, "Processing /cancel command");

    let reply = controller.cancel(user_id).await;
    send_reply(&bot, msg.chat.id, reply).await?;
    Ok(())
}
