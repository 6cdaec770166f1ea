use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which the language preference is persisted and sent to the API.
pub const LANGUAGE_KEY: &str = "language";

/// Language preference for UI copy and localized content/search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported language: {0}")]
pub struct ParseLanguageError(pub String);

impl Language {
    /// Parse a language tag such as `en`, `en-US`, `zh_cn` or `zh-CN`.
    ///
    /// Only the primary subtag is significant.
    pub fn parse(raw: &str) -> Option<Self> {
        let primary = raw
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "zh" => Some(Language::ZhCn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseLanguageError(s.to_string()))
    }
}
