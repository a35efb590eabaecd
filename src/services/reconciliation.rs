//! Reconciliation of local translation records with the provider
//!
//! Polls the provider for every record that is not yet "translated" and
//! writes back the status and result text. Per-record failures are logged and
//! skipped; the next run picks the record up again.

use futures_util::{StreamExt, stream};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entities::translations;
use crate::error::TranslationError;
use crate::models::translation::TranslationStatus;
use crate::services::translation_provider::{ProviderStatus, TranslationProvider};
use crate::services::translation_store;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Non-terminal records found
    pub checked: usize,
    /// Records whose status or text changed
    pub updated: usize,
    pub unchanged: usize,
    /// Records whose fetch or write failed
    pub failed: usize,
}

enum RecordOutcome {
    Updated,
    Unchanged,
    Failed,
}

/// What a record should look like after applying the provider's report.
///
/// Returns `None` when nothing would change. Status never moves backwards, and
/// a result text is only taken when the provider sent a non-empty one and the
/// record has none yet; a stored translation is never replaced.
fn next_state(
    record: &translations::Model,
    remote: &ProviderStatus,
) -> Option<(TranslationStatus, Option<String>)> {
    let current = record
        .status
        .parse::<TranslationStatus>()
        .unwrap_or(TranslationStatus::Requested);
    let status = current.max(TranslationStatus::from_provider(&remote.status));

    let text = remote
        .translated_text
        .as_deref()
        .filter(|t| !t.is_empty() && record.translated_string.is_empty())
        .map(str::to_string);

    if status == current && text.is_none() && record.status == current.as_str() {
        return None;
    }

    Some((status, text))
}

async fn reconcile_record(
    db: &DatabaseConnection,
    provider: &dyn TranslationProvider,
    record: translations::Model,
) -> RecordOutcome {
    let uid = record.uid.trim();

    if record
        .status
        .parse::<TranslationStatus>()
        .is_ok_and(TranslationStatus::is_terminal)
    {
        debug!(uid = %uid, "Translation already terminal, skipping");
        return RecordOutcome::Unchanged;
    }

    let remote = match provider.fetch_status(uid).await {
        Ok(remote) => remote,
        Err(e) => {
            warn!(uid = %uid, error = %e, "Failed to fetch translation status, skipping");
            return RecordOutcome::Failed;
        }
    };

    let Some((status, text)) = next_state(&record, &remote) else {
        debug!(uid = %uid, status = %record.status, "Translation unchanged");
        return RecordOutcome::Unchanged;
    };

    match translation_store::update_translation(db, uid, status, text.as_deref()).await {
        Ok(()) => {
            debug!(
                uid = %uid,
                from = %record.status,
                to = %status,
                provider_status = %remote.status,
                "Translation updated"
            );
            RecordOutcome::Updated
        }
        Err(e) => {
            warn!(uid = %uid, error = %e, "Failed to store translation update, skipping");
            RecordOutcome::Failed
        }
    }
}

/// Bring every non-terminal record in line with the provider.
///
/// At most `max_concurrency` provider calls are in flight at once. Only the
/// initial listing query can fail the whole pass.
pub async fn reconcile_translations(
    db: &DatabaseConnection,
    provider: &dyn TranslationProvider,
    max_concurrency: usize,
) -> Result<ReconcileReport, TranslationError> {
    let open = translation_store::list_non_terminal(db).await?;

    let mut report = ReconcileReport {
        checked: open.len(),
        ..Default::default()
    };

    if open.is_empty() {
        debug!("No open translations to reconcile");
        return Ok(report);
    }

    info!(
        count = open.len(),
        max_concurrency = max_concurrency,
        "Reconciling open translations"
    );

    let outcomes: Vec<RecordOutcome> = stream::iter(open)
        .map(|record| reconcile_record(db, provider, record))
        .buffer_unordered(max_concurrency.max(1))
        .collect()
        .await;

    for outcome in outcomes {
        match outcome {
            RecordOutcome::Updated => report.updated += 1,
            RecordOutcome::Unchanged => report.unchanged += 1,
            RecordOutcome::Failed => report.failed += 1,
        }
    }

    info!(
        checked = report.checked,
        updated = report.updated,
        unchanged = report.unchanged,
        failed = report.failed,
        "Reconciliation pass completed"
    );

    Ok(report)
}
