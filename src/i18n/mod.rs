//! Internationalization module
//!
//! This module handles the localized texts of the bot: menu labels, prompts,
//! confirmations, and the static income category list.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
