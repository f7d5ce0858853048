//! Internationalization module
//!
//! This module holds the language data of the dashboard: the closed set of
//! supported locales, the built-in English/Japanese dictionary and the
//! translation table that the locale store reads from.

mod catalog;
pub mod loader;
pub mod locale;

// Re-export commonly used i18n components
pub use loader::{TranslationTable, TranslationParams, TranslationStats, LanguageStats};
pub use locale::Locale;
