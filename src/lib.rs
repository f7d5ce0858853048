//! FX Trading Synchronization System i18n
//!
//! Locale store for the trading dashboard: a translation table for the
//! supported display languages, a persisted locale preference and change
//! notification for every component that renders translated text.

pub mod config;
pub mod i18n;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use crate::config::Settings;
pub use utils::errors::{LocaleError, Result};

// Re-export main components for easy access
pub use i18n::{Locale, TranslationTable};
pub use state::{LocaleChange, LocaleStorage, LocaleStore, Subscription};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
