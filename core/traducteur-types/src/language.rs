//! Supported translation languages.
//!
//! The service understands exactly three language codes. [`LanguageOption`]
//! carries the display metadata a picker needs for each of them.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language supported by the translation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French.
    #[default]
    Fr,
    /// English.
    En,
    /// Arabic.
    Ar,
}

impl Language {
    /// Every supported language, in picker order.
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Ar];

    /// Returns the ISO 639-1 code sent on the wire.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Returns the picker metadata for this language.
    #[must_use]
    pub fn option(&self) -> &'static LanguageOption {
        match self {
            Self::Fr => &LANGUAGE_OPTIONS[0],
            Self::En => &LANGUAGE_OPTIONS[1],
            Self::Ar => &LANGUAGE_OPTIONS[2],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(Error::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Display metadata for a [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: Language,
    /// Name of the language, written in that language.
    pub name: &'static str,
    /// Flag emoji shown next to the name.
    pub flag: &'static str,
}

/// Picker table, ordered as [`Language::ALL`].
pub const LANGUAGE_OPTIONS: [LanguageOption; 3] = [
    LanguageOption {
        code: Language::Fr,
        name: "Français",
        flag: "🇫🇷",
    },
    LanguageOption {
        code: Language::En,
        name: "English",
        flag: "🇺🇸",
    },
    LanguageOption {
        code: Language::Ar,
        name: "العربية",
        flag: "🇸🇦",
    },
];

impl LanguageOption {
    /// Returns the options a picker should offer when `excluded` is already
    /// selected on the other side of the translation.
    #[must_use]
    pub fn available_excluding(excluded: Option<Language>) -> Vec<&'static LanguageOption> {
        LANGUAGE_OPTIONS
            .iter()
            .filter(|opt| Some(opt.code) != excluded)
            .collect()
    }
}

impl fmt::Display for LanguageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.flag, self.name, self.code)
    }
}
