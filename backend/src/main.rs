//! Warehouse Management Backend - Server binary

use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wms_backend::config::{Config, StorageBackend};
use wms_backend::external::{AutomationClient, RemoteTokenVerifier, TokenVerifier};
use wms_backend::store::{InventoryStore, MemoryStore, PgStore, TaskStore, TransactionLog};
use wms_backend::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wms_backend=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Warehouse Management Server");
    tracing::info!("Environment: {}", config.environment);

    // Open the storage backend for the lifetime of the process
    let (inventory, transactions, tasks): (
        Arc<dyn InventoryStore>,
        Arc<dyn TransactionLog>,
        Arc<dyn TaskStore>,
    ) = match config.database.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage backend");
            let store = Arc::new(MemoryStore::new());
            (store.clone(), store.clone(), store)
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(&config.database.url)
                .await?;

            tracing::info!("Database connection established");

            if config.environment == "development" {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations completed");
            }

            let store = Arc::new(PgStore::new(pool));
            (store.clone(), store.clone(), store)
        }
    };

    let verifier: Arc<dyn TokenVerifier> = Arc::new(RemoteTokenVerifier::new(
        config.auth.verify_url.clone(),
        Duration::from_secs(config.auth.timeout_secs),
    )?);

    let automation = AutomationClient::new(
        config.webhook.url.clone(),
        Duration::from_secs(config.webhook.timeout_secs),
    )?;

    // Create application state
    let state = AppState {
        inventory,
        transactions,
        tasks,
        verifier,
        automation,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
