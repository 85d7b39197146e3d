use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display language for labels and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "tr")]
    Turkish,
    #[default]
    #[serde(rename = "en")]
    English,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language {0:?} (expected \"tr\" or \"en\")")]
pub struct LanguageParseError(pub String);

impl Language {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Language::Turkish => "tr",
            Language::English => "en",
        }
    }

    #[must_use]
    pub fn all() -> &'static [Language] {
        &[Language::Turkish, Language::English]
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" | "turkish" | "türkçe" => Ok(Language::Turkish),
            "en" | "english" => Ok(Language::English),
            _ => Err(LanguageParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
