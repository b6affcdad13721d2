//! Bilingual content model and language resolution.
//!
//! Every user-facing string is stored as an English/Tamil pair. Resolution
//! picks the requested language and falls back to English when the
//! localized value is empty, so rendering never fails on a missing
//! translation. The active language is always passed in explicitly;
//! nothing here reads ambient state.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Languages supported by the public booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ta,
}

impl Language {
    /// Parse a language code as sent by the client.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "en" => Ok(Self::En),
            "ta" => Ok(Self::Ta),
            _ => Err(CoreError::Validation(format!(
                "Unknown language code '{code}'. Must be one of: en, ta"
            ))),
        }
    }

    /// The two-letter code used in value keys and client payloads.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ta => "ta",
        }
    }
}

// ---------------------------------------------------------------------------
// LocalizedString
// ---------------------------------------------------------------------------

/// A value carrying both supported-language variants together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub en: String,
    pub ta: String,
}

impl LocalizedString {
    pub fn new(en: impl Into<String>, ta: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ta: ta.into(),
        }
    }

    /// English-only pair, used where a translation does not exist yet.
    pub fn english(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ta: String::new(),
        }
    }

    /// Resolve to the given language, falling back to English when the
    /// localized value is empty. Never fails; both variants empty resolves
    /// to the empty string.
    pub fn resolve(&self, language: Language) -> &str {
        let localized = match language {
            Language::En => &self.en,
            Language::Ta => &self.ta,
        };
        if localized.is_empty() {
            &self.en
        } else {
            localized
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
