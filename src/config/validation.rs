//! Configuration validation module
//!
//! This module provides validation functions for the locale store
//! configuration so that a bad setting is caught at startup.

use crate::i18n::Locale;
use crate::utils::errors::{LocaleError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_i18n_config(&settings.i18n)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_locale.parse::<Locale>().is_err() {
        return Err(LocaleError::Config(format!(
            "Default locale must be one of {:?}, got '{}'",
            Locale::codes(),
            config.default_locale
        )));
    }

    if config.storage_key.trim().is_empty() {
        return Err(LocaleError::Config(
            "Locale storage key is required".to_string()
        ));
    }

    if let Some(dir) = &config.translations_dir {
        if dir.trim().is_empty() {
            return Err(LocaleError::Config(
                "Translations directory must not be empty when set".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate durable storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    match config.backend {
        StorageBackend::Memory => {}
        StorageBackend::File => {
            if config.file_path.is_empty() {
                return Err(LocaleError::Config(
                    "Storage file path is required for the file backend".to_string()
                ));
            }
        }
        StorageBackend::Redis => {
            if config.redis_url.is_empty() {
                return Err(LocaleError::Config(
                    "Redis URL is required for the redis backend".to_string()
                ));
            }
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LocaleError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LocaleError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_default_locale() {
        let mut settings = Settings::default();
        settings.i18n.default_locale = "fr".to_string();
        assert_matches!(validate_settings(&settings), Err(LocaleError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_storage_key() {
        let mut settings = Settings::default();
        settings.i18n.storage_key = "  ".to_string();
        assert_matches!(validate_settings(&settings), Err(LocaleError::Config(_)));
    }

    #[test]
    fn test_backend_specific_fields() {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Redis;
        settings.storage.redis_url = String::new();
        assert!(validate_settings(&settings).is_err());

        settings.storage.backend = StorageBackend::Memory;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
