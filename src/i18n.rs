//! Internationalization support.
//!
//! This module provides language selection and the chrono locale used for
//! weekday labels and date strings.

use chrono::Locale;
use serde::{Deserialize, Serialize};

/// Environment variables consulted for the runtime locale, highest priority first
pub const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Supported display languages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Finnish,
    Spanish,
    German,
    Swedish,
}

impl Language {
    /// Get the short locale code
    pub fn locale_code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Finnish => "fi",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Swedish => "sv",
        }
    }

    /// Get the display name for the language (in its native language)
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Finnish => "Suomi",
            Language::Spanish => "Español",
            Language::German => "Deutsch",
            Language::Swedish => "Svenska",
        }
    }

    /// Locale handed to chrono's localized formatting
    pub fn locale(&self) -> Locale {
        match self {
            Language::English => Locale::en_US,
            Language::Finnish => Locale::fi_FI,
            Language::Spanish => Locale::es_ES,
            Language::German => Locale::de_DE,
            Language::Swedish => Locale::sv_SE,
        }
    }

    /// Look a language up by its locale code ("fi", "fi_FI" and "fi-FI" all match)
    pub fn from_locale_code(code: &str) -> Option<Self> {
        let prefix = code.split(['_', '-', '.']).next()?.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.locale_code() == prefix)
    }

    /// Language of the runtime locale, English when unset or unsupported
    pub fn from_env() -> Self {
        Self::from_locale_vars(|name| std::env::var(name).ok())
    }

    /// Resolve the locale from `LC_ALL`, `LC_TIME` and `LANG` as looked up by
    /// `var`. The first non-empty variable decides.
    pub fn from_locale_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        LOCALE_VARS
            .iter()
            .find_map(|name| var(name).filter(|value| !value.is_empty()))
            .and_then(|value| Self::from_locale_code(&value))
            .unwrap_or_default()
    }

    /// Get all available languages
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Finnish,
            Language::Spanish,
            Language::German,
            Language::Swedish,
        ]
    }
}
