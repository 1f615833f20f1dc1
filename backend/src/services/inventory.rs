//! Inventory CRUD and reporting queries

use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::InventoryStore;
use shared::models::{CreateInventoryInput, InventoryPatch, InventoryRecord};
use shared::validation::{validate_inventory_create, validate_inventory_patch};

/// Inventory service over the injected store.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

/// Aggregate sum of all stocked quantities.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySummary {
    pub total_quantity: i64,
}

/// Count of records below the low-stock threshold.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockSummary {
    pub low_stock_count: i64,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<InventoryRecord>> {
        self.store.list().await
    }

    pub async fn get(&self, sku: &str) -> AppResult<InventoryRecord> {
        self.store
            .get(sku)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))
    }

    pub async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord> {
        validate_inventory_create(&input).map_err(|e| AppError::Validation(e.to_string()))?;
        self.store.create(input).await
    }

    /// Corrective field patch. A qty patched here bypasses the movement
    /// log; the transaction processor is the consistent path.
    pub async fn update(&self, sku: &str, patch: InventoryPatch) -> AppResult<InventoryRecord> {
        validate_inventory_patch(&patch).map_err(|e| AppError::Validation(e.to_string()))?;
        self.store
            .update_fields(sku, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))
    }

    pub async fn delete(&self, sku: &str) -> AppResult<()> {
        if !self.store.delete(sku).await? {
            return Err(AppError::NotFound("Inventory item".to_string()));
        }
        Ok(())
    }

    pub async fn total_quantity(&self) -> AppResult<QuantitySummary> {
        Ok(QuantitySummary {
            total_quantity: self.store.total_quantity().await?,
        })
    }

    pub async fn low_stock_count(&self) -> AppResult<LowStockSummary> {
        Ok(LowStockSummary {
            low_stock_count: self.store.low_stock_count().await?,
        })
    }
}
