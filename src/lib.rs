// src/lib.rs

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use models::language::LanguagePreference;
use services::translation_provider::TranslationProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub provider: Arc<dyn TranslationProvider>,
    /// Used when a request does not name a source/target language
    pub default_languages: LanguagePreference,
    pub reconcile_max_concurrency: usize,
}

pub mod entities {
    pub mod prelude;
    pub mod translations;
}

pub mod services {
    pub mod reconciliation;
    pub mod translation_provider;
    pub mod translation_requests;
    pub mod translation_store;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;

/// Build the HTTP router with every endpoint and the shared middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/translations",
            get(handlers::translation::list_translations)
                .post(handlers::translation::create_translation),
        )
        .route(
            "/translations/{uid}",
            get(handlers::translation::get_translation)
                .delete(handlers::translation::delete_translation),
        )
        .route(
            "/languages",
            get(handlers::language::get_languages).post(handlers::language::set_languages),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
