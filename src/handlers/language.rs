use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::AppState;
use crate::error::error_response;
use crate::models::language::{
    LanguagePreference, LanguagePreferenceRequest, LanguagesResponse, available_languages,
};
use crate::models::translation::ErrorResponse;

pub async fn get_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        available_languages: available_languages(),
        defaults: state.default_languages.clone(),
    })
}

/// Validate a language choice and hand back the full preference.
///
/// Nothing is stored server-side; the client sends the returned codes with its
/// next requests.
pub async fn set_languages(
    State(state): State<AppState>,
    payload: Result<Json<LanguagePreferenceRequest>, JsonRejection>,
) -> Result<Json<LanguagePreference>, (StatusCode, Json<ErrorResponse>)> {
    let Json(payload) = payload.map_err(|e| error_response(e.into()))?;

    let preference = LanguagePreference::resolve(
        payload.source_language.as_deref(),
        payload.target_language.as_deref(),
        &state.default_languages,
    )
    .map_err(error_response)?;

    tracing::debug!(
        source = %preference.source_language.code,
        target = %preference.target_language.code,
        "Language preference changed"
    );

    Ok(Json(preference))
}
