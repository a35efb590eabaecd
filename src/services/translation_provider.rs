//! Client for the external translation API
//!
//! The provider is asynchronous: `submit` creates a job and returns its uid,
//! `fetch_status` polls that job until it reports "completed".

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::TranslationError;

/// Job accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTranslation {
    pub uid: String,
    pub status: String,
    pub text: String,
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
}

/// Provider's current view of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub status: String,
    #[serde(
        rename = "translatedText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    text: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Submit `text` for translation from `source_language` to `target_language`
    async fn submit(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<SubmittedTranslation, TranslationError>;

    /// Poll the job identified by `uid`
    async fn fetch_status(&self, uid: &str) -> Result<ProviderStatus, TranslationError>;
}

/// Reject empty or whitespace-only fields before anything goes over the wire
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> Result<&'a str, TranslationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TranslationError::InvalidInput(format!(
            "Field '{}' cant be empty",
            field
        )));
    }
    Ok(trimmed)
}

/// Unbabel-style HTTP provider authenticated with a static API key
#[derive(Clone)]
pub struct UnbabelClient {
    client: Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl UnbabelClient {
    pub fn new(base_url: String, username: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            api_key,
        }
    }

    fn authorization(&self) -> String {
        format!("ApiKey {}:{}", self.username, self.api_key)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TranslationError> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(TranslationError::ProviderUnavailable(format!(
                "{}: {}",
                status,
                provider_error_message(&error_text)
            )));
        }

        Ok(response.json().await?)
    }
}

/// Pull the human-readable message out of a provider error body.
///
/// The API answers failures with `{"error_message": ...}` or `{"error": ...}`;
/// anything else is returned verbatim.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error_message", "error"].iter().find_map(|key| match v.get(*key) {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            })
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TranslationProvider for UnbabelClient {
    async fn submit(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<SubmittedTranslation, TranslationError> {
        require_non_blank("text", text)?;

        tracing::info!(
            source = %source_language,
            target = %target_language,
            chars = text.chars().count(),
            "Requesting translation"
        );

        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.authorization())
            .header("Content-Type", "application/json")
            .json(&SubmitBody {
                text,
                source_language,
                target_language,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "An error occurred while requesting translation");
                TranslationError::from(e)
            })?;

        let submitted: SubmittedTranslation = Self::read_json(response).await?;

        tracing::debug!(uid = %submitted.uid, status = %submitted.status, "Translation accepted");

        Ok(submitted)
    }

    async fn fetch_status(&self, uid: &str) -> Result<ProviderStatus, TranslationError> {
        let uid = require_non_blank("uid", uid)?;

        let url = format!("{}/{}/", self.base_url, uid);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.authorization())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status: ProviderStatus = Self::read_json(response).await?;

        tracing::debug!(uid = %uid, status = %status.status, "Fetched translation status");

        Ok(status)
    }
}
