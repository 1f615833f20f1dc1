//! Warehouse Management Backend
//!
//! CRUD endpoints for inventory items, stock-movement transactions, and
//! operational tasks, plus a free-text message intake channel that
//! forwards extracted data to an external automation webhook. The
//! transaction processor keeps movement records and inventory
//! quantities consistent: quantities never go negative and every logged
//! movement corresponds to an applied delta.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::{AutomationClient, TokenVerifier};
use store::{InventoryStore, TaskStore, TransactionLog};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<dyn InventoryStore>,
    pub transactions: Arc<dyn TransactionLog>,
    pub tasks: Arc<dyn TaskStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub automation: AutomationClient,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Warehouse Management API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
