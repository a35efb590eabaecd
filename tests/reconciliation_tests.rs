mod common;

use std::time::Duration;

use translation_tracker::error::TranslationError;
use translation_tracker::services::reconciliation::reconcile_translations;
use translation_tracker::services::translation_requests::submit_translation;
use translation_tracker::services::translation_store;

use crate::common::{MockProvider, default_languages, setup_test_db};

#[tokio::test]
async fn test_submit_then_complete_example() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    let record = submit_translation(&db, provider.as_ref(), "Test", &default_languages())
        .await
        .unwrap();

    assert_eq!(record.original_string, "Test");
    assert_eq!(record.translated_string, "");
    assert_eq!(record.status, "requested");
    assert_eq!(record.source_language, "en");
    assert_eq!(record.target_language, "es");
    assert!(!record.uid.is_empty());

    provider.set_status(&record.uid, "completed", Some("Prueba"));
    let report = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    assert_eq!(report.checked, 1);
    assert_eq!(report.updated, 1);

    let stored = translation_store::find_by_uid(&db, &record.uid).await.unwrap();
    assert_eq!(stored.translated_string, "Prueba");
    assert_eq!(stored.status, "translated");
}

#[tokio::test]
async fn test_submit_stores_trimmed_text() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    let record = submit_translation(&db, provider.as_ref(), "  Hello world \n", &default_languages())
        .await
        .unwrap();

    assert_eq!(record.original_string, "Hello world");
}

#[tokio::test]
async fn test_blank_text_never_reaches_provider() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    for text in ["", " ", "\t\n"] {
        let err = submit_translation(&db, provider.as_ref(), text, &default_languages())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidInput(_)));
    }

    let too_long = "a".repeat(501);
    let err = submit_translation(&db, provider.as_ref(), &too_long, &default_languages())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::InvalidInput(_)));

    assert_eq!(provider.submit_calls(), 0);
    assert!(translation_store::list_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unrecognized_provider_status_becomes_pending() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    translation_store::insert_request(&db, "Good morning", "u-1", "en", "fr")
        .await
        .unwrap();
    provider.set_status("u-1", "translating", None);

    reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();

    let stored = translation_store::find_by_uid(&db, "u-1").await.unwrap();
    assert_eq!(stored.status, "pending");
    assert_eq!(stored.translated_string, "");
}

#[tokio::test]
async fn test_reconciliation_is_idempotent() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    translation_store::insert_request(&db, "One", "u-1", "en", "es").await.unwrap();
    translation_store::insert_request(&db, "Two", "u-2", "en", "es").await.unwrap();
    translation_store::insert_request(&db, "Three", "u-3", "en", "es").await.unwrap();
    provider.set_status("u-1", "completed", Some("Uno"));
    provider.set_status("u-2", "accepted", None);
    provider.set_status("u-3", "new", None);

    let first = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    let after_first: Vec<(String, String, String)> = translation_store::list_all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.uid, r.status, r.translated_string))
        .collect();

    let second = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    let after_second: Vec<(String, String, String)> = translation_store::list_all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.uid, r.status, r.translated_string))
        .collect();

    assert_eq!(after_first, after_second);
    assert_eq!(first.checked, 3);
    assert_eq!(first.updated, 2);
    assert_eq!(first.unchanged, 1);

    // u-1 is terminal now and drops out of the second pass
    assert_eq!(second.checked, 2);
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 2);
}

#[tokio::test]
async fn test_one_failure_does_not_block_others() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    for uid in ["ok-1", "broken", "ok-2", "unknown"] {
        translation_store::insert_request(&db, "Text", uid, "en", "es").await.unwrap();
    }
    provider.set_status("ok-1", "completed", Some("Texto"));
    provider.fail("broken");
    provider.set_status("ok-2", "completed", Some("Texto dos"));
    // "unknown" is not registered with the provider at all

    let report = reconcile_translations(&db, provider.as_ref(), 2).await.unwrap();
    assert_eq!(report.checked, 4);
    assert_eq!(report.updated, 2);
    assert_eq!(report.failed, 2);

    let ok_1 = translation_store::find_by_uid(&db, "ok-1").await.unwrap();
    assert_eq!(ok_1.status, "translated");
    let ok_2 = translation_store::find_by_uid(&db, "ok-2").await.unwrap();
    assert_eq!(ok_2.translated_string, "Texto dos");

    let broken = translation_store::find_by_uid(&db, "broken").await.unwrap();
    assert_eq!(broken.status, "requested");
}

#[tokio::test]
async fn test_terminal_records_are_not_fetched() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    translation_store::insert_request(&db, "Done", "done", "en", "es").await.unwrap();
    translation_store::update_translation(
        &db,
        "done",
        translation_tracker::models::translation::TranslationStatus::Translated,
        Some("Hecho"),
    )
    .await
    .unwrap();
    translation_store::insert_request(&db, "Open", "open", "en", "es").await.unwrap();
    provider.set_status("open", "new", None);

    reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();

    assert_eq!(provider.fetched_uids(), vec!["open".to_string()]);
}

#[tokio::test]
async fn test_no_open_records_is_a_no_op() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    let report = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    assert_eq!(report.checked, 0);
    assert!(provider.fetched_uids().is_empty());
}

#[tokio::test]
async fn test_status_does_not_regress() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    translation_store::insert_request(&db, "Text", "u-1", "en", "es").await.unwrap();
    provider.set_status("u-1", "translating", None);
    reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();

    provider.set_status("u-1", "new", None);
    let report = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    assert_eq!(report.unchanged, 1);

    let stored = translation_store::find_by_uid(&db, "u-1").await.unwrap();
    assert_eq!(stored.status, "pending");
}

#[tokio::test]
async fn test_stored_translated_text_is_kept() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    translation_store::insert_request(&db, "Test", "u-1", "en", "es").await.unwrap();

    provider.set_status("u-1", "translating", Some("Prueb"));
    reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();

    provider.set_status("u-1", "translating", Some("Otra cosa"));
    let report = reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();
    assert_eq!(report.unchanged, 1);

    let stored = translation_store::find_by_uid(&db, "u-1").await.unwrap();
    assert_eq!(stored.translated_string, "Prueb");
    assert_eq!(stored.status, "pending");

    provider.set_status("u-1", "completed", Some("Otra cosa"));
    reconcile_translations(&db, provider.as_ref(), 4).await.unwrap();

    let stored = translation_store::find_by_uid(&db, "u-1").await.unwrap();
    assert_eq!(stored.translated_string, "Prueb");
    assert_eq!(stored.status, "translated");
}

#[tokio::test]
async fn test_concurrent_fetches_respect_limit() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();
    provider.set_fetch_delay(Duration::from_millis(20));

    for i in 0..12 {
        let uid = format!("u-{}", i);
        translation_store::insert_request(&db, "Text", &uid, "en", "es").await.unwrap();
        provider.set_status(&uid, "completed", Some("Texto"));
    }

    let report = reconcile_translations(&db, provider.as_ref(), 3).await.unwrap();

    assert_eq!(report.checked, 12);
    assert_eq!(report.updated, 12);
    assert_eq!(report.failed, 0);
    assert!(provider.peak_in_flight() <= 3, "peak was {}", provider.peak_in_flight());
    // fetches do overlap; a sequential loop would never exceed one
    assert!(provider.peak_in_flight() > 1, "peak was {}", provider.peak_in_flight());
    assert!(translation_store::list_non_terminal(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_limit_still_reconciles() {
    let db = setup_test_db().await.unwrap();
    let provider = MockProvider::new();

    for uid in ["a", "b"] {
        translation_store::insert_request(&db, "Text", uid, "en", "es").await.unwrap();
        provider.set_status(uid, "accepted", None);
    }

    let report = reconcile_translations(&db, provider.as_ref(), 0).await.unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(provider.peak_in_flight(), 1);
}
