//! Translation status enum and request/response bodies

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entities::translations;
use crate::models::language::{Language, LanguagePreference};
use crate::services::reconciliation::ReconcileReport;

/// Local translation status, progressing requested → pending → translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Accepted by the provider, not yet picked up
    Requested,
    /// Provider is working on it
    Pending,
    /// Result available; terminal
    Translated,
}

impl TranslationStatus {
    /// Map the provider's status vocabulary onto the local enum.
    ///
    /// Only "new" and "completed" are recognised; every other value
    /// (including ones the provider may add later) counts as pending.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim() {
            "new" => TranslationStatus::Requested,
            "completed" => TranslationStatus::Translated,
            _ => TranslationStatus::Pending,
        }
    }

    /// Terminal records are excluded from reconciliation
    pub fn is_terminal(self) -> bool {
        self == TranslationStatus::Translated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TranslationStatus::Requested => "requested",
            TranslationStatus::Pending => "pending",
            TranslationStatus::Translated => "translated",
        }
    }
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TranslationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "requested" => Ok(TranslationStatus::Requested),
            "pending" => Ok(TranslationStatus::Pending),
            "translated" => Ok(TranslationStatus::Translated),
            _ => Err(format!("Unknown translation status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub id: i32,
    pub uid: String,
    pub original_string: String,
    pub translated_string: String,
    pub status: String,
    pub source_language: String,
    pub target_language: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<translations::Model> for TranslationResponse {
    fn from(model: translations::Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid,
            original_string: model.original_string,
            translated_string: model.translated_string,
            status: model.status,
            source_language: model.source_language,
            target_language: model.target_language,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Everything the front-end needs to render the translations page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationListResponse {
    pub translations: Vec<TranslationResponse>,
    pub count: usize,
    pub reconciliation: ReconcileReport,
    pub languages: LanguagePreference,
    pub available_languages: Vec<Language>,
    pub max_text_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTranslationResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
