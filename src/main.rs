use ledger_service::api::{create_router, AppState};
use ledger_service::config::{DbEndpoint, Settings};
use ledger_service::observability::{init_logging, init_metrics, HealthChecker, LogConfig};
use ledger_service::services::LedgerService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    init_logging(&LogConfig::from(&settings.application));
    info!("Configuration loaded");

    let metrics_handle = init_metrics()?;

    // Connect to PostgreSQL
    let db = &settings.database;
    match db.resolve_host() {
        DbEndpoint::Socket(dir) => info!(
            "Connecting to database via socket {} as {} (db={})",
            dir.display(),
            db.user,
            db.name
        ),
        DbEndpoint::Tcp { host, port } => info!(
            "Connecting to database at {}:{} as {} (db={})",
            host, port, db.user, db.name
        ),
    }

    let pool = PgPoolOptions::new()
        .max_connections(db.pool_size)
        .acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
        .connect_with(db.connect_options())
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied successfully");

    let ledger = Arc::new(LedgerService::new(pool.clone()));
    let health_checker = Arc::new(HealthChecker::new(pool.clone()));
    let state = AppState::new(ledger, health_checker).with_metrics(metrics_handle);
    let app = create_router(state);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
