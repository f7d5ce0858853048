//! Error handling for the locale store
//!
//! This module defines the error taxonomy of the crate. Only the ambient
//! operations (configuration, override loading, storage back ends) return
//! these errors to callers; the store itself swallows them and degrades to
//! a safe default.

use thiserror::Error;

/// Main error type for locale store operations
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Missing translation for key '{key}' in locale '{locale}'")]
    MissingTranslation { locale: String, key: String },

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for locale store operations
pub type Result<T> = std::result::Result<T, LocaleError>;

impl LocaleError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LocaleError::MissingTranslation { .. } => true,
            LocaleError::InvalidLocale(_) => true,
            LocaleError::StorageUnavailable(_) => true,
            LocaleError::Config(_) => false,
            LocaleError::Settings(_) => false,
            LocaleError::Redis(_) => true,
            LocaleError::Serialization(_) => false,
            LocaleError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LocaleError::MissingTranslation { .. } => ErrorSeverity::Info,
            LocaleError::InvalidLocale(_) => ErrorSeverity::Info,
            LocaleError::StorageUnavailable(_) => ErrorSeverity::Warning,
            LocaleError::Redis(_) => ErrorSeverity::Warning,
            LocaleError::Config(_) => ErrorSeverity::Critical,
            LocaleError::Settings(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
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
    fn test_store_errors_are_recoverable() {
        let missing = LocaleError::MissingTranslation {
            locale: "ja".to_string(),
            key: "Dashboard".to_string(),
        };
        assert!(missing.is_recoverable());
        assert_eq!(missing.severity(), ErrorSeverity::Info);

        let storage = LocaleError::StorageUnavailable("no backend".to_string());
        assert!(storage.is_recoverable());
        assert_eq!(storage.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = LocaleError::Config("storage key is required".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "Configuration error: storage key is required");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }
}
