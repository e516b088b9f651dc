//! Application settings management
//! 
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    /// Either a list of tables or `"id:name,id:name"` from the environment
    #[serde(default, deserialize_with = "deserialize_known_users")]
    pub known_users: Vec<KnownUser>,
    pub categories: CategoriesConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// A user on the allow-list with the name the bot greets them by
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KnownUser {
    pub id: i64,
    pub name: String,
}

/// Category configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoriesConfig {
    /// Expense categories inserted (if absent) at startup, none by default
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub default_expense: Vec<String>,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub file_prefix: String,
    pub log_user_interactions: bool,
}

impl Settings {
    /// Load settings from defaults, an optional `config` file and `BUDGET__*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load settings using the given configuration file name (extension optional)
    pub fn load_from(file_name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(
                config::Environment::with_prefix("BUDGET")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BudgetBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: "sqlite://data.db".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            known_users: vec![],
            categories: CategoriesConfig {
                default_expense: vec![],
            },
            i18n: I18nConfig {
                default_language: "ru".to_string(),
                supported_languages: vec!["ru".to_string(), "en".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                file_prefix: "family-budget-bot.log".to_string(),
                log_user_interactions: true,
            },
        }
    }
}

/// A list as written in a file, or a comma separated string from an env var
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrInline<T> {
    List(Vec<T>),
    Inline(String),
}

fn inline_items(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_known_user(item: &str) -> Result<KnownUser, String> {
    let (id, name) = item
        .split_once(':')
        .ok_or_else(|| format!("expected id:name, got {:?}", item))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid user id in {:?}", item))?;

    Ok(KnownUser { id, name: name.trim().to_string() })
}

fn deserialize_known_users<'de, D>(deserializer: D) -> Result<Vec<KnownUser>, D::Error>
where
    D: Deserializer<'de>,
{
    match ListOrInline::<KnownUser>::deserialize(deserializer)? {
        ListOrInline::List(users) => Ok(users),
        ListOrInline::Inline(value) => inline_items(&value)
            .map(parse_known_user)
            .collect::<Result<_, _>>()
            .map_err(de::Error::custom),
    }
}

fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListOrInline::<String>::deserialize(deserializer)? {
        ListOrInline::List(items) => items,
        ListOrInline::Inline(value) => inline_items(&value).map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults_use_single_sqlite_connection() {
        let settings = Settings::default();
        assert!(settings.database.url.starts_with("sqlite:"));
        assert_eq!(settings.database.max_connections, 1);
        assert_eq!(settings.i18n.default_language, "ru");
        assert!(settings.categories.default_expense.is_empty());
        assert!(settings.known_users.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[bot]
token = "123:abc"

[[known_users]]
id = 1
name = "ARSENY"

[[known_users]]
id = 2
name = "LERA"
"#
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.bot.token, "123:abc");
        assert_eq!(settings.known_users.len(), 2);
        assert_eq!(settings.known_users[1].name, "LERA");
        // untouched sections keep their defaults
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        std::env::set_var("BUDGET__BOT__TOKEN", "env:token");
        std::env::set_var("BUDGET__LOGGING__LEVEL", "debug");

        let settings = Settings::load_from("does-not-exist");

        std::env::remove_var("BUDGET__BOT__TOKEN");
        std::env::remove_var("BUDGET__LOGGING__LEVEL");

        let settings = settings.unwrap();
        assert_eq!(settings.bot.token, "env:token");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.database.url, "sqlite://data.db");
    }

    #[test]
    #[serial]
    fn test_environment_only_configuration() {
        std::env::set_var("BUDGET__BOT__TOKEN", "env:token");
        std::env::set_var("BUDGET__KNOWN_USERS", "111:ARSENY, 222:LERA");
        std::env::set_var("BUDGET__CATEGORIES__DEFAULT_EXPENSE", "Еда,Дом");

        let settings = Settings::load_from("does-not-exist");

        std::env::remove_var("BUDGET__BOT__TOKEN");
        std::env::remove_var("BUDGET__KNOWN_USERS");
        std::env::remove_var("BUDGET__CATEGORIES__DEFAULT_EXPENSE");

        let settings = settings.unwrap();
        assert_eq!(
            settings.known_users,
            vec![
                KnownUser { id: 111, name: "ARSENY".to_string() },
                KnownUser { id: 222, name: "LERA".to_string() },
            ]
        );
        assert_eq!(settings.categories.default_expense, vec!["Еда".to_string(), "Дом".to_string()]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_missing_known_users_fail_validation_not_loading() {
        let mut settings = Settings::load_from("does-not-exist").unwrap();
        assert!(settings.known_users.is_empty());

        settings.bot.token = "123:abc".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Exactly 2"), "{}", err);
    }

    #[test]
    #[serial]
    fn test_malformed_inline_known_users_rejected() {
        std::env::set_var("BUDGET__KNOWN_USERS", "111-ARSENY");
        let settings = Settings::load_from("does-not-exist");
        std::env::remove_var("BUDGET__KNOWN_USERS");

        assert!(settings.is_err());
    }
}
