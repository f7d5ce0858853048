//! Translation table and override loading
//!
//! This module provides the lookup table behind the locale store: the
//! built-in dashboard dictionary, optional JSON overrides read from disk,
//! placeholder formatting and key coverage statistics.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, info, warn};
use crate::utils::errors::{LocaleError, Result};
use super::catalog;
use super::Locale;

/// Read-only mapping from locale to `key -> localized string`
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    translations: HashMap<Locale, HashMap<String, String>>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl TranslationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in dashboard dictionary
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for locale in Locale::ALL {
            for (key, value) in catalog::entries_for(locale) {
                table.insert(locale, key, value);
            }
        }
        table
    }

    /// Insert or replace a single entry
    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.translations
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Look up a key in one locale. An empty value counts as missing.
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.translations
            .get(&locale)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Check whether a locale has an entry for a key
    pub fn contains(&self, locale: Locale, key: &str) -> bool {
        self.get(locale, key).is_some()
    }

    /// Number of keys defined for a locale
    pub fn len(&self, locale: Locale) -> usize {
        self.translations.get(&locale).map_or(0, HashMap::len)
    }

    /// True when no locale has any entry
    pub fn is_empty(&self) -> bool {
        self.translations.values().all(HashMap::is_empty)
    }

    /// Overlay `<dir>/<code>.json` files on top of the current entries.
    ///
    /// Returns the number of entries read. A missing directory or file is
    /// skipped; a malformed file is an error.
    pub async fn load_overrides(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();

        if !dir.exists() {
            warn!("Translations directory not found: {}", dir.display());
            return Ok(0);
        }

        let mut total = 0;
        for locale in Locale::ALL {
            let file_path = dir.join(format!("{}.json", locale.code()));

            if file_path.exists() {
                let count = self.load_language_file(&file_path, locale).await?;
                info!("Loaded {} translation overrides for language: {}", count, locale);
                total += count;
            } else {
                debug!("No translation override file: {}", file_path.display());
            }
        }

        Ok(total)
    }

    /// Load a single flat JSON object of string values
    async fn load_language_file(&mut self, file_path: &Path, locale: Locale) -> Result<usize> {
        let content = fs::read_to_string(file_path).await?;
        let parsed: Value = serde_json::from_str(&content)?;

        let Value::Object(map) = parsed else {
            return Err(LocaleError::Config(format!(
                "Invalid translation file format for {}: expected a JSON object",
                locale
            )));
        };

        self.merge_object(locale, map)
    }

    fn merge_object(&mut self, locale: Locale, map: Map<String, Value>) -> Result<usize> {
        let mut count = 0;
        for (key, value) in map {
            match value {
                Value::String(text) => {
                    self.insert(locale, key, text);
                    count += 1;
                }
                other => {
                    return Err(LocaleError::Config(format!(
                        "Translation '{}' for {} must be a string, got {}",
                        key, locale, other
                    )));
                }
            }
        }
        Ok(count)
    }

    /// Substitute `{name}` placeholders with parameter values
    pub fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
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

    /// Keys present in some other locale but absent from `locale`, sorted
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let all_keys: BTreeSet<&String> = self
            .translations
            .values()
            .flat_map(|entries| entries.keys())
            .collect();

        all_keys
            .into_iter()
            .filter(|key| !self.contains(locale, key))
            .cloned()
            .collect()
    }

    /// Get translation statistics
    pub fn stats(&self) -> TranslationStats {
        let languages = Locale::ALL
            .into_iter()
            .map(|locale| LanguageStats {
                locale,
                key_count: self.len(locale),
                missing_count: self.missing_keys(locale).len(),
            })
            .collect();

        TranslationStats {
            languages,
            total_keys: self.len(Locale::DEFAULT),
        }
    }
}

/// Translation statistics
#[derive(Debug, Clone)]
pub struct TranslationStats {
    pub languages: Vec<LanguageStats>,
    /// Key count of the default locale
    pub total_keys: usize,
}

/// Language-specific statistics
#[derive(Debug, Clone)]
pub struct LanguageStats {
    pub locale: Locale,
    pub key_count: usize,
    pub missing_count: usize,
}
