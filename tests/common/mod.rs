#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use translation_tracker::AppState;
use translation_tracker::error::TranslationError;
use translation_tracker::models::language::LanguagePreference;
use translation_tracker::services::translation_provider::{
    ProviderStatus, SubmittedTranslation, TranslationProvider, require_non_blank,
};

/// Set up a fresh in-memory database with the schema applied
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // every pooled connection to :memory: would be a separate database
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// In-process stand-in for the translation API
#[derive(Default)]
pub struct MockProvider {
    statuses: Mutex<HashMap<String, Result<ProviderStatus, String>>>,
    submit_calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
    fetch_delay_ms: AtomicU64,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `fetch_status(uid)` report `status` with an optional result text
    pub fn set_status(&self, uid: &str, status: &str, translated_text: Option<&str>) {
        self.statuses.lock().unwrap().insert(
            uid.to_string(),
            Ok(ProviderStatus {
                status: status.to_string(),
                translated_text: translated_text.map(str::to_string),
            }),
        );
    }

    /// Make `fetch_status(uid)` fail as if the provider were down
    pub fn fail(&self, uid: &str) {
        self.statuses
            .lock()
            .unwrap()
            .insert(uid.to_string(), Err("503 Service Unavailable".to_string()));
    }

    /// Make every `fetch_status` take `delay` before answering
    pub fn set_fetch_delay(&self, delay: Duration) {
        self.fetch_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Highest number of `fetch_status` calls observed running at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn fetched_uids(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn submit(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<SubmittedTranslation, TranslationError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        require_non_blank("text", text)?;

        let uid = uuid::Uuid::new_v4().simple().to_string()[..10].to_string();
        self.set_status(&uid, "new", None);

        Ok(SubmittedTranslation {
            uid,
            status: "new".to_string(),
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        })
    }

    async fn fetch_status(&self, uid: &str) -> Result<ProviderStatus, TranslationError> {
        let uid = require_non_blank("uid", uid)?;
        self.fetched.lock().unwrap().push(uid.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.statuses.lock().unwrap().get(uid) {
            Some(Ok(status)) => Ok(status.clone()),
            Some(Err(e)) => Err(TranslationError::ProviderUnavailable(e.clone())),
            None => Err(TranslationError::ProviderUnavailable(format!(
                "404 Not Found: {}",
                uid
            ))),
        }
    }
}

pub fn default_languages() -> LanguagePreference {
    LanguagePreference::from_codes("en", "es").expect("en/es are in the catalogue")
}

pub async fn create_test_app_state(provider: Arc<MockProvider>) -> AppState {
    let db = setup_test_db().await.expect("Failed to set up test DB");

    AppState {
        db,
        provider,
        default_languages: default_languages(),
        reconcile_max_concurrency: 4,
    }
}
