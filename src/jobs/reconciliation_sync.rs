//! Timed reconciliation job
//!
//! Listing requests already reconcile on every call; this job keeps records
//! fresh when nobody is looking. Supports graceful shutdown via SIGINT.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::AppState;
use crate::services::reconciliation::reconcile_translations;

/// Start the background reconciliation loop, ticking every `period`
pub async fn start_reconciliation_job(state: AppState, period: Duration) {
    tokio::spawn(async move {
        info!(
            interval_secs = period.as_secs(),
            max_concurrency = state.reconcile_max_concurrency,
            "Reconciliation job started"
        );

        let mut interval = interval(period);
        // A slow provider must not cause a burst of back-to-back passes
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received, stopping reconciliation job");
                    break;
                }
                _ = interval.tick() => {
                    match reconcile_translations(
                        &state.db,
                        state.provider.as_ref(),
                        state.reconcile_max_concurrency,
                    )
                    .await
                    {
                        Ok(report) if report.checked > 0 => {
                            info!(
                                checked = report.checked,
                                updated = report.updated,
                                failed = report.failed,
                                "Scheduled reconciliation completed"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => {
                            // next tick will retry
                            error!(error = %e, "Scheduled reconciliation failed");
                        }
                    }
                }
            }
        }

        info!("Reconciliation job stopped");
    });
}
