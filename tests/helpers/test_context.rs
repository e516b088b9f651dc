//! Test context for unified test setup
//!
//! This module wires an in-memory database, the services and the dialog
//! controller the same way the binary does.

use std::sync::Arc;
use family_budget_bot::config::{I18nConfig, KnownUser, Settings};
use family_budget_bot::i18n::I18n;
use family_budget_bot::services::ServiceFactory;
use family_budget_bot::state::{DialogController, DialogStep, Reply, StateStorage};
use family_budget_bot::utils::errors::BudgetBotError;

use super::database_helper::TestDatabase;
use super::test_data::{FIRST_USER_ID, SECOND_USER_ID};

/// Test configuration options
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Expense categories seeded before the test
    pub seed_categories: Vec<String>,
    /// Register the two known users before the test
    pub register_known_users: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            seed_categories: Vec::new(),
            register_known_users: true,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub database: TestDatabase,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub storage: StateStorage,
    pub controller: DialogController,
    pub i18n: Arc<I18n>,
}

impl TestContext {
    /// Create a new test context with all components initialized
    pub async fn new() -> Result<Self, BudgetBotError> {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Result<Self, BudgetBotError> {
        let database = TestDatabase::new().await?;
        let settings = Self::create_test_settings();

        let i18n = Arc::new(I18n::load(&settings.i18n).await?);
        let services = ServiceFactory::new(&settings, database.service());
        services.ledger_service.seed_expense_categories(&config.seed_categories).await?;

        if config.register_known_users {
            for user in &settings.known_users {
                services.user_service.register(user.id, "telegram-name").await?;
            }
        }

        let storage = StateStorage::new();
        let controller = DialogController::new(storage.clone(), services.ledger_service.clone(), i18n.clone());

        Ok(Self {
            database,
            settings,
            services,
            storage,
            controller,
            i18n,
        })
    }

    /// Settings with the two known test users and the shipped translations
    pub fn create_test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.database.url = "sqlite::memory:".to_string();
        settings.known_users = vec![
            KnownUser { id: FIRST_USER_ID, name: "ARSENY".to_string() },
            KnownUser { id: SECOND_USER_ID, name: "LERA".to_string() },
        ];
        settings.categories.default_expense = Vec::new();
        settings.i18n = test_i18n_config();
        settings
    }

    /// Send one text message through the dialog
    pub async fn send(&self, user_id: i64, text: &str) -> Result<Reply, BudgetBotError> {
        self.controller.handle(user_id, text).await
    }

    /// Send several messages, failing on the first error
    pub async fn send_all(&self, user_id: i64, texts: &[&str]) -> Result<Reply, BudgetBotError> {
        let mut last = None;
        for text in texts {
            last = Some(self.send(user_id, text).await?);
        }
        last.ok_or_else(|| BudgetBotError::InvalidInput("no messages sent".to_string()))
    }

    /// Current dialog step of a user
    pub async fn step(&self, user_id: i64) -> DialogStep {
        self.controller.step(user_id).await
    }

    /// Translated text for a key
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, None)
    }
}

/// I18n configuration pointing at the shipped translation files
pub fn test_i18n_config() -> I18nConfig {
    I18nConfig {
        default_language: "ru".to_string(),
        supported_languages: vec!["ru".to_string(), "en".to_string()],
        translations_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/translations").to_string(),
    }
}
