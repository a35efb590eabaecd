pub mod reconciliation_sync;
