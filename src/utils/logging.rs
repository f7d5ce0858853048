//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the locale store.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::i18n::Locale;
use crate::utils::errors::{LocaleError, Result};

/// Target used for missing-translation diagnostics, so they can be
/// filtered independently (`fx_sync_i18n::missing=warn`).
pub const MISSING_TRANSLATION_TARGET: &str = "fx_sync_i18n::missing";

/// Initialize logging based on configuration.
///
/// When a log directory is configured the returned guard must be kept
/// alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LocaleError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "fx-sync-i18n.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| LocaleError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a locale change applied by the store
pub fn log_locale_change(previous: Locale, locale: Locale, revision: u64) {
    info!(
        previous = %previous,
        locale = %locale,
        revision = revision,
        "Locale changed"
    );
}

/// Log a translation key that has no entry for the active locale
pub fn log_missing_translation(locale: Locale, key: &str) {
    warn!(
        target: MISSING_TRANSLATION_TARGET,
        locale = %locale,
        key = key,
        "Translation key not found, falling back to key"
    );
}

/// Log a swallowed storage failure
pub fn log_storage_failure(operation: &str, key: &str, error: &LocaleError) {
    warn!(
        operation = operation,
        key = key,
        error = %error,
        "Locale storage unavailable, continuing without persistence"
    );
}

/// Log a persisted value that is not a supported locale
pub fn log_rejected_persisted_value(key: &str, value: &str) {
    debug!(
        key = key,
        value = value,
        "Persisted locale is not supported, using default"
    );
}
