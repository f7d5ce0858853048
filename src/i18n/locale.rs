//! Supported display locales

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::LocaleError;

/// A display locale. The set is closed; supporting a new language means
/// adding a variant here and a column to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ja,
}

impl Locale {
    /// Locale adopted when nothing valid has been persisted.
    ///
    /// Japanese, even though English is listed first.
    pub const DEFAULT: Locale = Locale::Ja;

    /// Every supported locale, in declaration order
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ja];

    /// Short code used for persistence and file names
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// Codes of every supported locale
    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|l| l.code()).collect()
    }

    /// Translation key naming this locale in a language switcher
    pub fn display_key(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ja => "Japanese",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Exact, case-sensitive match on the locale code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| LocaleError::InvalidLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
        assert!("EN".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_is_japanese() {
        assert_eq!(Locale::default(), Locale::Ja);
        assert_eq!(Locale::ALL[0], Locale::En);
    }

    #[test]
    fn test_display_and_serde_use_code() {
        assert_eq!(Locale::En.to_string(), "en");
        assert_eq!(serde_json::to_string(&Locale::Ja).unwrap(), "\"ja\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
