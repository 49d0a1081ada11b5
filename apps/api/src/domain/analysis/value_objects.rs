use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Languages the pipeline can detect and request translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LanguageCode {
    #[default]
    En,
    Ko,
    Ja,
    Zh,
    Hi,
    Th,
    Ar,
    He,
    Ru,
    El,
    Bn,
    Ta,
    Te,
    Vi,
    Es,
    Fr,
    De,
    Pt,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 18] = [
        Self::En,
        Self::Ko,
        Self::Ja,
        Self::Zh,
        Self::Hi,
        Self::Th,
        Self::Ar,
        Self::He,
        Self::Ru,
        Self::El,
        Self::Bn,
        Self::Ta,
        Self::Te,
        Self::Vi,
        Self::Es,
        Self::Fr,
        Self::De,
        Self::Pt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
            Self::Ja => "ja",
            Self::Zh => "zh",
            Self::Hi => "hi",
            Self::Th => "th",
            Self::Ar => "ar",
            Self::He => "he",
            Self::Ru => "ru",
            Self::El => "el",
            Self::Bn => "bn",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Vi => "vi",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Pt => "pt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ko => "Korean",
            Self::Ja => "Japanese",
            Self::Zh => "Chinese",
            Self::Hi => "Hindi",
            Self::Th => "Thai",
            Self::Ar => "Arabic",
            Self::He => "Hebrew",
            Self::Ru => "Russian",
            Self::El => "Greek",
            Self::Bn => "Bengali",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Vi => "Vietnamese",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
            Self::Pt => "Portuguese",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    /// Accepts bare codes and region-qualified locales (`ko-KR`, `zh_Hans`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let primary = match primary.as_str() {
            // legacy Hebrew code still returned by some engines
            "iw" => "he".to_string(),
            _ => primary,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == primary)
            .ok_or_else(|| format!("unsupported language code: {}", s))
    }
}

/// Upper bound on query length sent to the search backend.
pub const MAX_QUERY_CHARS: usize = 80;

/// A compact product search phrase, never empty and at most [`MAX_QUERY_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for blank input; longer input is cut on a char boundary.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        let bounded: String = trimmed.chars().take(MAX_QUERY_CHARS).collect();
        Some(Self(bounded.trim_end().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a domain hint for generic web search backends.
    pub fn with_hint(&self, hint: &str) -> String {
        format!("{} {}", self.0, hint)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
