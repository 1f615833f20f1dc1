//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::inventory::{InventoryService, LowStockSummary, QuantitySummary};
use crate::AppState;
use shared::models::{CreateInventoryInput, InventoryPatch, InventoryRecord};

/// List all inventory records
pub async fn get_inventory(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.list().await?))
}

/// Fetch one inventory record by sku
pub async fn get_inventory_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.get(&sku).await?))
}

/// Create an inventory record
pub async fn create_inventory(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInventoryInput>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.create(input).await?))
}

/// Patch fields of an inventory record
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    AppJson(patch): AppJson<InventoryPatch>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.update(&sku, patch).await?))
}

/// Delete an inventory record
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = InventoryService::new(state.inventory);
    service.delete(&sku).await?;
    Ok(Json(serde_json::json!({
        "message": "Inventory item deleted successfully"
    })))
}

/// Aggregate sum of all stocked quantities
pub async fn get_all_quantity(State(state): State<AppState>) -> AppResult<Json<QuantitySummary>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.total_quantity().await?))
}

/// Count of records below the low-stock threshold
pub async fn get_low_quantity_items(
    State(state): State<AppState>,
) -> AppResult<Json<LowStockSummary>> {
    let service = InventoryService::new(state.inventory);
    Ok(Json(service.low_stock_count().await?))
}
