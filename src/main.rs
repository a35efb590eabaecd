use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translation_tracker::{
    AppState, build_router, config::AppConfig, jobs::reconciliation_sync,
    services::translation_provider::UnbabelClient,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,translation_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let provider = UnbabelClient::new(
        config.api_url.clone(),
        config.api_username.clone(),
        config.api_key.clone(),
    );

    let state = AppState {
        db,
        provider: Arc::new(provider),
        default_languages: config.default_languages.clone(),
        reconcile_max_concurrency: config.reconcile_max_concurrency,
    };

    match config.reconcile_interval {
        Some(period) => {
            reconciliation_sync::start_reconciliation_job(state.clone(), period).await;
        }
        None => {
            tracing::info!("RECONCILE_INTERVAL_SECS not set - reconciliation runs on listing requests only");
        }
    }

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        "Server listening on {}",
        listener.local_addr().expect("Listener has no local address")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await
        .expect("Server error");
}
