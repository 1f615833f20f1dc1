//! In-memory storage backend
//!
//! Backs all three store interfaces with maps behind a single
//! `tokio::sync::RwLock`. Quantity adjustments hold the write lock for
//! the whole read-check-write sequence, which gives `adjust_quantity`
//! the same atomicity the Postgres backend gets from its conditional
//! update.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, TaskStore, TransactionLog};
use shared::models::{
    CreateInventoryInput, InventoryPatch, InventoryRecord, NewMovement, TaskPatch, TaskRecord,
    TransactionRecord, LOW_STOCK_THRESHOLD,
};

/// In-memory backend for tests and local runs without Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    inventory: HashMap<String, InventoryRecord>,
    transactions: Vec<TransactionRecord>,
    tasks: HashMap<Uuid, TaskRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn get(&self, sku: &str) -> AppResult<Option<InventoryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.inventory.get(sku).cloned())
    }

    async fn list(&self) -> AppResult<Vec<InventoryRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<_> = inner.inventory.values().cloned().collect();
        records.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(records)
    }

    async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord> {
        let mut inner = self.inner.write().await;
        if inner.inventory.contains_key(&input.sku) {
            return Err(AppError::DuplicateKey(input.sku));
        }
        let now = Utc::now();
        let record = InventoryRecord {
            sku: input.sku.clone(),
            name: input.name,
            qty: input.qty,
            unit_of_measure: input.unit_of_measure,
            warehouse: input.warehouse,
            location: input.location,
            image_ref: input.image_ref,
            expiry: input.expiry,
            created_at: now,
            updated_at: now,
        };
        inner.inventory.insert(input.sku, record.clone());
        Ok(record)
    }

    async fn update_fields(
        &self,
        sku: &str,
        patch: InventoryPatch,
    ) -> AppResult<Option<InventoryRecord>> {
        let mut inner = self.inner.write().await;
        let Some(record) = inner.inventory.get_mut(sku) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(qty) = patch.qty {
            record.qty = qty;
        }
        if let Some(uom) = patch.unit_of_measure {
            record.unit_of_measure = uom;
        }
        if let Some(warehouse) = patch.warehouse {
            record.warehouse = warehouse;
        }
        if let Some(location) = patch.location {
            record.location = Some(location);
        }
        if let Some(image_ref) = patch.image_ref {
            record.image_ref = Some(image_ref);
        }
        if let Some(expiry) = patch.expiry {
            record.expiry = Some(expiry);
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, sku: &str) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.inventory.remove(sku).is_some())
    }

    async fn adjust_quantity(&self, sku: &str, delta: i64) -> AppResult<InventoryRecord> {
        let mut inner = self.inner.write().await;
        let record = inner
            .inventory
            .get_mut(sku)
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
        let new_qty = record.qty.checked_add(delta).ok_or_else(|| {
            AppError::Validation("quantity adjustment overflows".to_string())
        })?;
        if new_qty < 0 {
            return Err(AppError::InsufficientStock {
                sku: sku.to_string(),
                available: record.qty,
                requested: delta.abs(),
            });
        }
        record.qty = new_qty;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn total_quantity(&self) -> AppResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.inventory.values().map(|r| r.qty).sum())
    }

    async fn low_stock_count(&self) -> AppResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .inventory
            .values()
            .filter(|r| r.qty < LOW_STOCK_THRESHOLD)
            .count() as i64)
    }
}

#[async_trait]
impl TransactionLog for MemoryStore {
    async fn append(&self, movement: NewMovement) -> AppResult<TransactionRecord> {
        let mut inner = self.inner.write().await;
        let record = TransactionRecord {
            id: Uuid::new_v4(),
            sku: movement.sku,
            movement_type: movement.movement_type,
            qty: movement.qty,
            warehouse: movement.warehouse,
            occurred_at: movement.occurred_at.unwrap_or_else(Utc::now),
            actor: movement.actor,
            note: movement.note,
        };
        inner.transactions.push(record.clone());
        Ok(record)
    }

    async fn list_descending(&self) -> AppResult<Vec<TransactionRecord>> {
        let inner = self.inner.read().await;
        let mut records = inner.transactions.clone();
        records.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(records)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, record: TaskRecord) -> AppResult<TaskRecord> {
        let mut inner = self.inner.write().await;
        inner.tasks.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> AppResult<Vec<TaskRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<_> = inner.tasks.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> AppResult<Option<TaskRecord>> {
        let mut inner = self.inner.write().await;
        let Some(record) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(task_type) = patch.task_type {
            record.task_type = task_type;
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(priority) = patch.priority {
            record.priority = priority;
        }
        if let Some(payload) = patch.payload {
            record.payload = payload;
        }
        if let Some(due_at) = patch.due_at {
            record.due_at = Some(due_at);
        }
        if let Some(assignee) = patch.assignee {
            record.assignee = Some(assignee);
        }
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.remove(&id).is_some())
    }
}
