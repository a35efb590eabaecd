//! Error type shared by the store, the provider client and the handlers

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use sea_orm::DbErr;

use crate::models::translation::ErrorResponse;

#[derive(Debug)]
pub enum TranslationError {
    /// Empty, whitespace-only or otherwise unusable input; raised before any network call
    InvalidInput(String),
    /// Transport failure or non-success response from the translation provider
    ProviderUnavailable(String),
    /// No translation with the given uid
    NotFound(String),
    DatabaseError(String),
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TranslationError::ProviderUnavailable(msg) => {
                write!(f, "Translation provider unavailable: {}", msg)
            }
            TranslationError::NotFound(uid) => write!(f, "Translation not found: {}", uid),
            TranslationError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for TranslationError {}

impl From<DbErr> for TranslationError {
    fn from(e: DbErr) -> Self {
        TranslationError::DatabaseError(e.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        TranslationError::ProviderUnavailable(e.to_string())
    }
}

/// Malformed or wrong-typed request bodies are user input errors
impl From<JsonRejection> for TranslationError {
    fn from(rejection: JsonRejection) -> Self {
        TranslationError::InvalidInput(rejection.body_text())
    }
}

impl TranslationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TranslationError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            TranslationError::NotFound(_) => StatusCode::NOT_FOUND,
            TranslationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert a service error into the `(status, body)` pair handlers return
pub fn error_response(e: TranslationError) -> (StatusCode, Json<ErrorResponse>) {
    if e.status_code().is_server_error() {
        tracing::error!(error = %e, "Request failed");
    }

    (
        e.status_code(),
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
