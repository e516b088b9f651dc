//! Family Budget Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use family_budget_bot::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, connection::{create_pool, DatabaseConfig}},
    services::ServiceFactory,
    state::{DialogController, StateStorage},
    i18n::I18n,
    middleware::LoggingMiddleware,
    handlers::{self, Command},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging).context("Failed to initialize logging")?;

    info!("Starting {}...", family_budget_bot::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database))
        .await
        .context("Failed to connect to database")?;

    let database_service = DatabaseService::new(db_pool);
    info!("Running database migrations...");
    database_service.ensure_schema().await.context("Failed to run database migrations")?;
    database_service.health_check().await.context("Database health check failed")?;

    // Initialize i18n system
    info!("Loading translations...");
    let i18n = Arc::new(I18n::load(&settings.i18n).await.context("Failed to load translations")?);
    info!(default_language = i18n.default_language(), "Translations loaded");

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(&settings, database_service);
    services
        .ledger_service
        .seed_expense_categories(&settings.categories.default_expense)
        .await
        .context("Failed to seed expense categories")?;

    let controller = DialogController::new(StateStorage::new(), services.ledger_service.clone(), i18n.clone());
    let logging_middleware = LoggingMiddleware::new(settings.logging.log_user_interactions);

    let bot = Bot::new(&settings.bot.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![services, controller, i18n, logging_middleware])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build();

    info!("Family budget bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("Family budget bot has been shut down.");
    Ok(())
}
