//! Submission of new translation requests

use sea_orm::DatabaseConnection;

use crate::config::MAX_TEXT_LENGTH;
use crate::entities::translations;
use crate::error::TranslationError;
use crate::models::language::LanguagePreference;
use crate::services::translation_provider::{TranslationProvider, require_non_blank};
use crate::services::translation_store;

/// Check user text before it is sent anywhere; returns the trimmed text
pub fn validate_text(text: &str) -> Result<&str, TranslationError> {
    let text = require_non_blank("text", text)?;

    let length = text.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(TranslationError::InvalidInput(format!(
            "Text is {} characters long, the limit is {}",
            length, MAX_TEXT_LENGTH
        )));
    }

    Ok(text)
}

/// Submit `text` to the provider and record the accepted job locally.
///
/// The new record starts as "requested" with an empty translation; the
/// reconciliation loop takes it from there.
pub async fn submit_translation(
    db: &DatabaseConnection,
    provider: &dyn TranslationProvider,
    text: &str,
    languages: &LanguagePreference,
) -> Result<translations::Model, TranslationError> {
    let text = validate_text(text)?;

    let source = &languages.source_language.code;
    let target = &languages.target_language.code;

    let submitted = provider.submit(text, source, target).await?;

    let uid = submitted.uid.trim();
    if uid.is_empty() {
        return Err(TranslationError::ProviderUnavailable(
            "Provider accepted the translation without assigning a uid".to_string(),
        ));
    }

    let record = translation_store::insert_request(db, text, uid, source, target).await?;

    tracing::info!(
        uid = %record.uid,
        source = %source,
        target = %target,
        "Translation requested"
    );

    Ok(record)
}
