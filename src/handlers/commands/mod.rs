//! Command handlers module
//! 
//! This module contains handlers for the bot commands /start, /help and /cancel.

pub mod cancel;
pub mod help;
pub mod start;

use std::sync::Arc;
use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::state::DialogController;
use crate::i18n::I18n;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Family budget commands:")]
pub enum Command {
    #[command(description = "Greet and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Cancel the entry in progress")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    controller: DialogController,
    i18n: Arc<I18n>,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services, controller, i18n).await,
        Command::Help => help::handle_help(bot, msg, i18n).await,
        Command::Cancel => cancel::handle_cancel(bot, msg, controller).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_commands() {
        assert_matches!(Command::parse("/start", "budget_bot"), Ok(Command::Start));
        assert_matches!(Command::parse("/cancel", "budget_bot"), Ok(Command::Cancel));
        assert!(Command::parse("/admin", "budget_bot").is_err());
    }
}
