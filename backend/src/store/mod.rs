//! Storage interfaces for inventory, the transaction log, and tasks
//!
//! Stores are injected trait objects with an explicit lifecycle: a
//! backend is opened once at process start and handed to the router as
//! `Arc<dyn ...>` handles, never reached through ambient globals. Two
//! backends implement all three interfaces: [`MemoryStore`] for tests
//! and local runs, [`PgStore`] for production.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::{
    CreateInventoryInput, InventoryPatch, InventoryRecord, NewMovement, TaskPatch, TaskRecord,
    TransactionRecord,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persisted mapping from SKU to stock record.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn get(&self, sku: &str) -> AppResult<Option<InventoryRecord>>;

    async fn list(&self) -> AppResult<Vec<InventoryRecord>>;

    /// Create a record; fails with `DuplicateKey` if the sku pre-exists.
    async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord>;

    /// Apply a partial field patch. Returns `None` if the sku is absent.
    async fn update_fields(
        &self,
        sku: &str,
        patch: InventoryPatch,
    ) -> AppResult<Option<InventoryRecord>>;

    /// Returns whether a record was removed.
    async fn delete(&self, sku: &str) -> AppResult<bool>;

    /// Atomically apply a signed quantity delta.
    ///
    /// The read-check-write sequence is a single unit: concurrent calls
    /// against the same sku serialize here, and a delta that would take
    /// the quantity negative fails with `InsufficientStock` without any
    /// mutation. Fails with `NotFound` if the sku is absent.
    async fn adjust_quantity(&self, sku: &str, delta: i64) -> AppResult<InventoryRecord>;

    /// Total quantity across all records; 0 when the store is empty.
    async fn total_quantity(&self) -> AppResult<i64>;

    /// Count of records with qty strictly below the low-stock threshold.
    async fn low_stock_count(&self) -> AppResult<i64>;
}

/// Append-only, time-ordered record of stock movements.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Append a movement, assigning its id and (when the caller omitted
    /// one) its occurrence timestamp.
    async fn append(&self, movement: NewMovement) -> AppResult<TransactionRecord>;

    /// A fresh snapshot of all movements, most recent first.
    async fn list_descending(&self) -> AppResult<Vec<TransactionRecord>>;
}

/// Plain CRUD storage for operational tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, record: TaskRecord) -> AppResult<TaskRecord>;

    async fn list(&self) -> AppResult<Vec<TaskRecord>>;

    /// Apply a partial patch. Returns `None` if the id is absent.
    async fn update(&self, id: Uuid, patch: TaskPatch) -> AppResult<Option<TaskRecord>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
