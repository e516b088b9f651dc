//! Message handlers module
//! 
//! Feeds direct text messages into the dialog and sends back its reply.

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use tracing::{debug, error, warn};
use crate::handlers::{is_direct_chat, keyboards::Handled, sender};
use crate::i18n::I18n;
use crate::middleware::LoggingMiddleware;
use crate::services::ServiceFactory;
use crate::state::{DialogController, Reply};
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    controller: DialogController,
    i18n: Arc<I18n>,
    logging: LoggingMiddleware,
) -> Result<()> {
    logging.log_message(&msg);

    if !is_direct_chat(msg.chat.id) {
        debug!(chat_id = msg.chat.id.0, "Ignoring message outside a direct chat");
        return Ok(());
    }

    let Some(text) = msg.text() else {
        debug!(chat_id = msg.chat.id.0, "Ignoring non-text message");
        return Ok(());
    };

    let user = sender(&msg)?;
    let user_id = user.id.0 as i64;
    let started = logging.start_timer();

    let handled = text_replies(&services, &controller, &i18n, user_id, &user.first_name, text).await;
    logging.log_handled(user_id, started, handled.is_ok());
    handled.send(&bot, msg.chat.id).await
}

/// Run one text message through registration and the dialog.
///
/// Failures still produce a notice for the user: `dialog.save_failed` when a
/// finished entry could not be written, `errors.generic` otherwise.
pub async fn text_replies(
    services: &ServiceFactory,
    controller: &DialogController,
    i18n: &I18n,
    user_id: i64,
    transport_name: &str,
    text: &str,
) -> Handled {
    let step = controller.step(user_id).await;

    match dialog_reply(services, controller, user_id, transport_name, text).await {
        Ok(reply) => Handled::reply(reply),
        Err(e) => {
            if e.is_recoverable() {
                warn!(user_id = user_id, step = %step, error = %e, severity = %e.severity(), "Dialog message failed");
            } else {
                error!(user_id = user_id, step = %step, error = %e, severity = %e.severity(), "Dialog message failed");
            }

            // Re-sending the category retries the write
            let key = if step.is_category() && e.is_storage_error() {
                "dialog.save_failed"
            } else {
                "errors.generic"
            };
            Handled::failed(Reply::text(i18n.t(key, None)), e)
        }
    }
}

async fn dialog_reply(
    services: &ServiceFactory,
    controller: &DialogController,
    user_id: i64,
    transport_name: &str,
    text: &str,
) -> Result<Reply> {
    // Operations reference the user row, so users who skipped /start get one here
    services.user_service.register(user_id, transport_name).await?;
    controller.handle(user_id, text).await
}
