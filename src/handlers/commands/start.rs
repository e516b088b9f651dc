//! Start command handler
//!
//! Registers the sender on first contact, greets them and shows the main menu.

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use tracing::{info, debug, error};
use crate::handlers::{keyboards::Handled, sender};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::state::{DialogController, Reply};
use crate::i18n::I18n;

/// Handle /start command
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    controller: DialogController,
    i18n: Arc<I18n>,
) -> Result<()> {
    let user = sender(&msg)?;
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");

    start_replies(&services, &controller, &i18n, user_id, &user.first_name)
        .await
        .send(&bot, chat_id)
        .await
}

/// Greeting and main menu for /start; a failed registration gets `errors.generic`
pub async fn start_replies(
    services: &ServiceFactory,
    controller: &DialogController,
    i18n: &I18n,
    user_id: i64,
    transport_name: &str,
) -> Handled {
    let registration = match services.user_service.register(user_id, transport_name).await {
        Ok(registration) => registration,
        Err(e) => {
            error!(user_id = user_id, error = %e, "Failed to register user");
            return Handled::failed(Reply::text(i18n.t("errors.generic", None)), e);
        }
    };

    if registration.created {
        info!(user_id = user_id, name = %registration.display_name, "New user started bot");
    }

    Handled::replies(vec![
        Reply::text(i18n.t_with("commands.start.greeting", "name", &registration.display_name)),
        controller.menu_reply(i18n.t("menu.title", None)),
    ])
}
