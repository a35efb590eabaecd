//! Supported languages and the per-request language preference

use serde::{Deserialize, Serialize};

use crate::error::TranslationError;

/// (code, name) pairs the provider sandbox accepts
const AVAILABLE_LANGUAGES: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("en", "English"),
    ("pt", "Portuguese"),
    ("fr", "French"),
];

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
pub const DEFAULT_TARGET_LANGUAGE: &str = "es";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

pub fn available_languages() -> Vec<Language> {
    AVAILABLE_LANGUAGES
        .iter()
        .map(|(code, name)| Language {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Look up a language by its code, case-insensitively
pub fn find_language(code: &str) -> Option<Language> {
    let code = code.trim().to_lowercase();
    available_languages().into_iter().find(|l| l.code == code)
}

/// Source/target pair selected by the client.
///
/// The client keeps this between requests and sends it back; the server holds
/// no per-user language state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreference {
    pub source_language: Language,
    pub target_language: Language,
}

impl LanguagePreference {
    /// Build a preference from two codes, both of which must be in the catalogue
    pub fn from_codes(source: &str, target: &str) -> Result<Self, TranslationError> {
        let source_language = find_language(source).ok_or_else(|| {
            TranslationError::InvalidInput(format!("Unsupported source language: {}", source))
        })?;
        let target_language = find_language(target).ok_or_else(|| {
            TranslationError::InvalidInput(format!("Unsupported target language: {}", target))
        })?;

        Ok(Self {
            source_language,
            target_language,
        })
    }

    /// Fill in whatever the client left out from `defaults`
    pub fn resolve(
        source: Option<&str>,
        target: Option<&str>,
        defaults: &LanguagePreference,
    ) -> Result<Self, TranslationError> {
        let source = source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&defaults.source_language.code);
        let target = target
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&defaults.target_language.code);

        Self::from_codes(source, target)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreferenceRequest {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResponse {
    pub available_languages: Vec<Language>,
    pub defaults: LanguagePreference,
}
