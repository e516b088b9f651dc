//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::collections::HashSet;
use crate::utils::errors::{BudgetBotError, Result};
use super::Settings;

/// Number of users on the allow-list
pub const KNOWN_USERS_COUNT: usize = 2;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_known_users(&settings.known_users)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;
    
    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BudgetBotError::Config(
            "Bot token is required".to_string()
        ));
    }
    
    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BudgetBotError::Config(
            "Database URL is required".to_string()
        ));
    }
    
    if config.max_connections == 0 {
        return Err(BudgetBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }
    
    if config.min_connections > config.max_connections {
        return Err(BudgetBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }
    
    Ok(())
}

/// Validate the allow-list of known users
fn validate_known_users(users: &[super::KnownUser]) -> Result<()> {
    if users.len() != KNOWN_USERS_COUNT {
        return Err(BudgetBotError::Config(format!(
            "Exactly {} known users must be configured, found {}",
            KNOWN_USERS_COUNT,
            users.len()
        )));
    }

    let mut seen = HashSet::new();
    for user in users {
        if user.name.trim().is_empty() {
            return Err(BudgetBotError::Config(
                format!("Known user {} has an empty name", user.id)
            ));
        }
        if !seen.insert(user.id) {
            return Err(BudgetBotError::Config(
                format!("Known user id {} is listed twice", user.id)
            ));
        }
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(BudgetBotError::Config(
            "Default language is required".to_string()
        ));
    }
    
    if !config.supported_languages.contains(&config.default_language) {
        return Err(BudgetBotError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }
    
    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BudgetBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }
    
    Ok(())
}
