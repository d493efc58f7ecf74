//! Languages the readability formulas are calibrated for.
//!
//! Both formulas were fitted on German text. Other languages are rejected at
//! start-up instead of silently producing miscalibrated scores.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A supported text language, one per hyphenation dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// German, reformed orthography.
    #[default]
    German1996,
    /// German, traditional orthography.
    German1901,
    /// Swiss German orthography (no `ß`).
    GermanSwiss,
}

impl Language {
    /// Canonical code used in configuration and logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::German1996 => "de_DE",
            Self::German1901 => "de-1901",
            Self::GermanSwiss => "de_CH",
        }
    }

    /// Primary subtag, as found in an HTML `lang` attribute.
    #[must_use]
    pub const fn primary_subtag(self) -> &'static str {
        "de"
    }

    pub(crate) const fn dictionary(self) -> hyphenation::Language {
        match self {
            Self::German1996 => hyphenation::Language::German1996,
            Self::German1901 => hyphenation::Language::German1901,
            Self::GermanSwiss => hyphenation::Language::GermanSwiss,
        }
    }
}

impl FromStr for Language {
    type Err = ConfigurationError;

    /// Parse a locale-like code. Separators `_` and `-` are interchangeable
    /// and matching ignores ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use reading_time::Language;
    ///
    /// assert_eq!("de_DE".parse::<Language>().ok(), Some(Language::German1996));
    /// assert_eq!("de-ch".parse::<Language>().ok(), Some(Language::GermanSwiss));
    /// assert!("en_US".parse::<Language>().is_err());
    /// ```
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalised = code.trim().replace('_', "-").to_ascii_lowercase();
        match normalised.as_str() {
            "de" | "de-de" | "de-at" | "de-1996" | "de-de-1996" => Ok(Self::German1996),
            "de-1901" | "de-de-1901" => Ok(Self::German1901),
            "de-ch" | "de-ch-1901" => Ok(Self::GermanSwiss),
            _ => Err(ConfigurationError::UnsupportedLanguage(code.to_owned())),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_owned()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
