//! Error handling for the budget bot
//! 
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the budget bot
#[derive(Error, Debug)]
pub enum BudgetBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    
    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },
    
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
    
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for budget bot operations
pub type Result<T> = std::result::Result<T, BudgetBotError>;

impl BudgetBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BudgetBotError::Database(_) => false,
            BudgetBotError::Migration(_) => false,
            BudgetBotError::Telegram(_) => true,
            BudgetBotError::Config(_) => false,
            BudgetBotError::ConfigLoad(_) => false,
            BudgetBotError::UserNotFound { .. } => false,
            BudgetBotError::InvalidStateTransition { .. } => false,
            BudgetBotError::InvalidAmount(_) => true,
            BudgetBotError::Serialization(_) => false,
            BudgetBotError::Io(_) => true,
            BudgetBotError::InvalidInput(_) => true,
        }
    }
    
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BudgetBotError::Database(_) => ErrorSeverity::Critical,
            BudgetBotError::Migration(_) => ErrorSeverity::Critical,
            BudgetBotError::Config(_) => ErrorSeverity::Critical,
            BudgetBotError::ConfigLoad(_) => ErrorSeverity::Critical,
            BudgetBotError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            BudgetBotError::InvalidAmount(_) => ErrorSeverity::Info,
            BudgetBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error came from the storage layer
    pub fn is_storage_error(&self) -> bool {
        matches!(self, BudgetBotError::Database(_) | BudgetBotError::Migration(_))
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_errors_are_recoverable() {
        let err = BudgetBotError::InvalidAmount("abc".to_string());
        assert!(err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_database_errors_are_fatal() {
        let err = BudgetBotError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.is_storage_error());
        assert_eq!(err.severity().to_string(), "CRITICAL");
    }
}
