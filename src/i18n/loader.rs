//! Translation loader and i18n management
//! 
//! This module provides the core internationalization functionality including
//! translation loading, key lookup, pluralization, and message formatting.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::utils::errors::{BudgetBotError, Result};
use crate::config::I18nConfig;

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    /// Language every reply is rendered in
    default_language: String,
    /// Supported language codes
    supported_languages: Vec<String>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
        }
    }

    /// Create an instance and load every supported language from `config.translations_dir`
    pub async fn load(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::new(config);
        i18n.load_translations(Path::new(&config.translations_dir)).await?;
        Ok(i18n)
    }

    /// Load all translation files from the translations directory.
    ///
    /// A missing or broken file is only fatal for the default language.
    pub async fn load_translations(&mut self, translations_dir: &Path) -> Result<()> {
        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));
            let is_default = lang_code == &self.default_language;

            match fs::read_to_string(&file_path).await {
                Ok(content) => match self.add_language(lang_code, &content) {
                    Ok(_) => info!("Loaded translations for language: {}", lang_code),
                    Err(e) if is_default => {
                        return Err(BudgetBotError::Config(
                            format!("Failed to load default language translations: {}", e)
                        ));
                    }
                    Err(e) => warn!("Failed to load translations for {}: {}", lang_code, e),
                },
                Err(e) if is_default => {
                    return Err(BudgetBotError::Config(
                        format!("Default language translation file not found: {} ({})", file_path.display(), e)
                    ));
                }
                Err(_) => warn!("Translation file not found: {}", file_path.display()),
            }
        }

        Ok(())
    }

    /// Register translations for a language from a JSON document
    pub fn add_language(&mut self, lang_code: &str, content: &str) -> Result<()> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => {
                debug!("Loaded {} translation keys for {}", count_keys(&map), lang_code);
                self.translations.insert(lang_code.to_string(), map);
                Ok(())
            }
            _ => Err(BudgetBotError::Config(
                format!("Invalid translation file format for {}", lang_code)
            )),
        }
    }

    /// Get a translated message
    pub fn t(&self, key: &str, params: Option<&TranslationParams>) -> String {
        match self.get_translation_value(key) {
            Some(translation) => {
                let text = extract_text_from_value(translation);
                format_message(&text, params)
            }
            None => {
                warn!("Translation key '{}' not found", key);
                key.to_string()
            }
        }
    }

    /// Get a translated message with a single `{name}`-style parameter
    pub fn t_with(&self, key: &str, name: &str, value: impl ToString) -> String {
        let mut params = TranslationParams::new();
        params.insert(name.to_string(), value.to_string());
        self.t(key, Some(&params))
    }

    /// Get a translated message with pluralization support
    pub fn tp(&self, key: &str, count: i64, params: Option<&TranslationParams>) -> String {
        let plural_form = get_plural_form(count, &self.default_language);
        let plural_key = format!("{}.{}", key, plural_form);

        let mut final_params = params.cloned().unwrap_or_default();
        final_params.insert("count".to_string(), count.to_string());

        // Languages with fewer forms fall back to "other"
        if self.get_translation_value(&plural_key).is_none() {
            return self.t(&format!("{}.other", key), Some(&final_params));
        }
        self.t(&plural_key, Some(&final_params))
    }

    /// Get a list of translated strings (e.g. keyboard labels)
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get_translation_value(key) {
            Some(Value::Array(items)) => items.iter().map(extract_text_from_value).collect(),
            Some(_) => {
                warn!("Translation key '{}' is not a list", key);
                Vec::new()
            }
            None => {
                warn!("Translation key '{}' not found", key);
                Vec::new()
            }
        }
    }

    /// Get default language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Look a key up in the default language, then in any other loaded language
    fn get_translation_value(&self, key: &str) -> Option<&Value> {
        lookup(self.translations.get(&self.default_language)?, key).or_else(|| {
            self.translations
                .iter()
                .filter(|(lang, _)| *lang != &self.default_language)
                .find_map(|(_, map)| lookup(map, key))
        })
    }
}

/// Resolve nested keys like "commands.start.greeting"
fn lookup<'a>(translations: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = translations.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

/// Extract text from JSON value (handle both strings and objects with pluralization)
fn extract_text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => {
            // For pluralization objects, default to "other" or first available key
            if let Some(other) = obj.get("other") {
                extract_text_from_value(other)
            } else if let Some((_, first_value)) = obj.iter().next() {
                extract_text_from_value(first_value)
            } else {
                String::new()
            }
        }
        _ => value.to_string(),
    }
}

/// Format message with parameters
fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    if let Some(params) = params {
        let mut result = template.to_string();
        for (key, value) in params {
            let placeholder = format!("{{{}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    } else {
        template.to_string()
    }
}

/// Determine plural form based on language-specific rules
fn get_plural_form(count: i64, lang: &str) -> &'static str {
    match lang {
        "ru" => {
            // Russian: one, few, many
            let abs_count = count.abs();
            let last_digit = abs_count % 10;
            let last_two_digits = abs_count % 100;
            
            if last_digit == 1 && last_two_digits != 11 {
                "one"
            } else if (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two_digits) {
                "few"
            } else {
                "many"
            }
        }
        _ => {
            // English rules
            if count == 1 { "one" } else { "other" }
        }
    }
}

/// Recursively count translation keys
fn count_keys(obj: &Map<String, Value>) -> usize {
    obj.values()
        .map(|value| match value {
            Value::Object(nested) => count_keys(nested),
            _ => 1,
        })
        .sum()
}
