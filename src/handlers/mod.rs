//! Bot handlers module
//! 
//! This module contains the Telegram side of the bot:
//! - The update schema routing direct messages to commands or the dialog
//! - Command handlers for /start, /help and /cancel
//! - The text message handler that feeds the dialog
//! - Rendering of dialog replies into reply keyboards

pub mod commands;
pub mod keyboards;
pub mod messages;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*, types::{ChatId, Message, Update, User}};
use tracing::{debug, error};
use crate::i18n::I18n;
use crate::middleware::LoggingMiddleware;
use crate::services::ServiceFactory;
use crate::state::DialogController;
use crate::utils::errors::{BudgetBotError, Result};

// Re-export commonly used handler functions
pub use commands::{handle_command, start::start_replies, Command};
pub use keyboards::{reply_keyboard, send_reply, Handled};
pub use messages::{handle_message, text_replies};

/// Error type of the dispatcher endpoints
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

type HandlerResult = std::result::Result<(), HandlerError>;

/// Whether a chat is a one-to-one chat with a user
pub fn is_direct_chat(chat_id: ChatId) -> bool {
    chat_id.is_user()
}

/// Update schema: direct messages go to commands or the dialog, everything else is dropped
pub fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .branch(
            dptree::filter(|msg: Message| is_direct_chat(msg.chat.id))
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(command_endpoint)
                )
                .branch(
                    // Handle text for the dialog
                    dptree::endpoint(message_endpoint)
                )
        )
        .branch(dptree::endpoint(ignore_endpoint))
}

/// Sender of a message
pub(crate) fn sender(msg: &Message) -> Result<&User> {
    msg.from
        .as_ref()
        .ok_or_else(|| BudgetBotError::InvalidInput("No user in message".to_string()))
}

async fn command_endpoint(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    controller: DialogController,
    i18n: Arc<I18n>,
) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, services, controller, i18n).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

async fn message_endpoint(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    controller: DialogController,
    i18n: Arc<I18n>,
    logging_middleware: LoggingMiddleware,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, services, controller, i18n, logging_middleware).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

async fn ignore_endpoint(msg: Message) -> HandlerResult {
    debug!(chat_id = msg.chat.id.0, "Ignoring message outside a direct chat");
    Ok(())
}
