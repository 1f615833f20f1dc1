//! Route definitions for the Warehouse Management API
//!
//! Read endpoints are public; mutating inventory and transaction
//! endpoints sit behind the bearer-token middleware.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::require_auth, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/inventory", inventory_routes(state.clone()))
        .nest("/transactions", transaction_routes(state))
        .nest("/tasks", task_routes())
        .route("/message", post(handlers::handle_message))
}

/// Inventory routes; mutations are protected
fn inventory_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/createInventory", post(handlers::create_inventory))
        .route("/updateInventory/:sku", put(handlers::update_inventory))
        .route("/deleteInventory/:sku", delete(handlers::delete_inventory))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/getInventory", get(handlers::get_inventory))
        .route("/getInventory/:sku", get(handlers::get_inventory_by_sku))
        .route("/getAllQuantityInventory", get(handlers::get_all_quantity))
        .route("/getLowQuanlityItems", get(handlers::get_low_quantity_items))
        .merge(protected)
}

/// Transaction routes; recording a movement is protected
fn transaction_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/addTransaction", post(handlers::add_transaction))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/getTransaction", get(handlers::get_transactions))
        .merge(protected)
}

/// Task routes (public CRUD)
fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/getTasks",
            get(handlers::get_tasks).post(handlers::create_task),
        )
        .route(
            "/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
}
