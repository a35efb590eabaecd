use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::AppState;
use crate::config::MAX_TEXT_LENGTH;
use crate::error::error_response;
use crate::models::language::{LanguagePreference, LanguagePreferenceRequest, available_languages};
use crate::models::translation::{
    CreateTranslationRequest, DeleteTranslationResponse, ErrorResponse, TranslationListResponse,
    TranslationResponse,
};
use crate::services::reconciliation::{ReconcileReport, reconcile_translations};
use crate::services::{translation_requests, translation_store};

/// List every translation, refreshing open ones from the provider first.
///
/// Reconciliation is best-effort: if it cannot even start, the stored records
/// are still returned.
pub async fn list_translations(
    State(state): State<AppState>,
    Query(params): Query<LanguagePreferenceRequest>,
) -> Result<Json<TranslationListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let languages = LanguagePreference::resolve(
        params.source_language.as_deref(),
        params.target_language.as_deref(),
        &state.default_languages,
    )
    .map_err(error_response)?;

    let reconciliation = match reconcile_translations(
        &state.db,
        state.provider.as_ref(),
        state.reconcile_max_concurrency,
    )
    .await
    {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Reconciliation skipped");
            ReconcileReport::default()
        }
    };

    let records = translation_store::list_all(&state.db)
        .await
        .map_err(error_response)?;

    let translations: Vec<TranslationResponse> =
        records.into_iter().map(TranslationResponse::from).collect();

    Ok(Json(TranslationListResponse {
        count: translations.len(),
        translations,
        reconciliation,
        languages,
        available_languages: available_languages(),
        max_text_length: MAX_TEXT_LENGTH,
    }))
}

pub async fn create_translation(
    State(state): State<AppState>,
    payload: Result<Json<CreateTranslationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TranslationResponse>), (StatusCode, Json<ErrorResponse>)> {
    let Json(payload) = payload.map_err(|e| error_response(e.into()))?;

    let languages = LanguagePreference::resolve(
        payload.source_language.as_deref(),
        payload.target_language.as_deref(),
        &state.default_languages,
    )
    .map_err(error_response)?;

    let record = translation_requests::submit_translation(
        &state.db,
        state.provider.as_ref(),
        &payload.text,
        &languages,
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn get_translation(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<TranslationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let record = translation_store::find_by_uid(&state.db, &uid)
        .await
        .map_err(error_response)?;

    Ok(Json(record.into()))
}

pub async fn delete_translation(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<DeleteTranslationResponse>, (StatusCode, Json<ErrorResponse>)> {
    translation_store::delete_by_uid(&state.db, &uid)
        .await
        .map_err(error_response)?;

    Ok(Json(DeleteTranslationResponse { success: true }))
}
