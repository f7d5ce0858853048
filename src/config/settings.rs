//! Locale store settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::i18n::Locale;

/// Environment variable prefix, e.g. `FXSYNC__I18N__DEFAULT_LOCALE=en`
pub const ENV_PREFIX: &str = "FXSYNC";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub i18n: I18nConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale adopted when nothing valid is persisted
    pub default_locale: String,
    /// Durable storage key holding the chosen locale
    pub storage_key: String,
    /// Optional directory of `<code>.json` override files
    pub translations_dir: Option<String>,
    /// Reject unknown locale codes instead of ignoring them
    pub strict_locale_validation: bool,
    /// Emit a warning for every key that falls back to itself
    pub log_missing_keys: bool,
}

/// Which durable store persists the locale preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

/// Durable storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// JSON file used by the `file` backend
    pub file_path: String,
    /// Connection URL used by the `redis` backend
    pub redis_url: String,
    /// Key prefix used by the `redis` backend
    pub prefix: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files; stdout only when unset
    pub file_path: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::DEFAULT.code().to_string(),
            storage_key: "fx-trading-locale".to_string(),
            translations_dir: None,
            strict_locale_validation: false,
            log_missing_keys: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: "data/locale.json".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            prefix: "fxsync:".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Parse settings from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::utils::errors::Result<()> {
        super::validation::validate_settings(self)
    }

    /// The configured default locale, falling back to the built-in default
    /// when the code is not supported
    pub fn default_locale(&self) -> Locale {
        self.i18n
            .default_locale
            .parse()
            .unwrap_or(Locale::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.i18n.default_locale, "ja");
        assert_eq!(settings.i18n.storage_key, "fx-trading-locale");
        assert!(!settings.i18n.strict_locale_validation);
        assert_eq!(settings.storage.backend, StorageBackend::File);
        assert_eq!(settings.default_locale(), Locale::Ja);
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = Settings::from_toml_str(
            r#"
            [i18n]
            default_locale = "en"
            strict_locale_validation = true

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(settings.default_locale(), Locale::En);
        assert!(settings.i18n.strict_locale_validation);
        assert_eq!(settings.i18n.storage_key, "fx-trading-locale");
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_unsupported_default_falls_back() {
        let mut settings = Settings::default();
        settings.i18n.default_locale = "fr".to_string();
        assert_eq!(settings.default_locale(), Locale::Ja);
    }
}
