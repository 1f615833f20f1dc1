//! Postgres storage backend
//!
//! All three store interfaces over a sqlx connection pool. The atomic
//! quantity adjustment is a single conditional `UPDATE ... WHERE
//! qty + delta >= 0`, so the sufficiency check and the write cannot be
//! interleaved by concurrent movements on the same sku. A `CHECK
//! (qty >= 0)` constraint in the schema backs the invariant up.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, TaskStore, TransactionLog};
use shared::models::{
    CreateInventoryInput, InventoryPatch, InventoryRecord, NewMovement, TaskPatch, TaskPayload,
    TaskRecord, TransactionRecord, UnknownVariant, LOW_STOCK_THRESHOLD,
};

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InventoryRow {
    sku: String,
    name: String,
    qty: i64,
    unit_of_measure: String,
    warehouse: String,
    location: Option<String>,
    image_ref: Option<String>,
    expiry: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        InventoryRecord {
            sku: row.sku,
            name: row.name,
            qty: row.qty,
            unit_of_measure: row.unit_of_measure,
            warehouse: row.warehouse,
            location: row.location,
            image_ref: row.image_ref,
            expiry: row.expiry,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    sku: String,
    movement_type: String,
    qty: i64,
    warehouse: String,
    occurred_at: DateTime<Utc>,
    actor: Option<String>,
    note: Option<String>,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(TransactionRecord {
            id: row.id,
            sku: row.sku,
            movement_type: parse_stored(&row.movement_type)?,
            qty: row.qty,
            warehouse: row.warehouse,
            occurred_at: row.occurred_at,
            actor: row.actor,
            note: row.note,
        })
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    task_type: String,
    status: String,
    priority: String,
    sku: String,
    warehouse: String,
    created_at: DateTime<Utc>,
    due_at: Option<DateTime<Utc>>,
    assignee: Option<String>,
}

impl TryFrom<TaskRow> for TaskRecord {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(TaskRecord {
            id: row.id,
            task_type: parse_stored(&row.task_type)?,
            status: parse_stored(&row.status)?,
            priority: parse_stored(&row.priority)?,
            payload: TaskPayload {
                sku: row.sku,
                warehouse: row.warehouse,
            },
            created_at: row.created_at,
            due_at: row.due_at,
            assignee: row.assignee,
        })
    }
}

/// Parse an enum column back from its stored text form.
fn parse_stored<T: FromStr<Err = UnknownVariant>>(value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|e: UnknownVariant| AppError::Storage(format!("corrupt enum column: {}", e)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

const INVENTORY_COLUMNS: &str = "sku, name, qty, unit_of_measure, warehouse, location, image_ref, \
                                 expiry, created_at, updated_at";

#[async_trait]
impl InventoryStore for PgStore {
    async fn get(&self, sku: &str) -> AppResult<Option<InventoryRecord>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {} FROM inventory WHERE sku = $1",
            INVENTORY_COLUMNS
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InventoryRecord::from))
    }

    async fn list(&self) -> AppResult<Vec<InventoryRecord>> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {} FROM inventory ORDER BY sku",
            INVENTORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryRecord::from).collect())
    }

    async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            INSERT INTO inventory (sku, name, qty, unit_of_measure, warehouse, location, image_ref, expiry)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(&input.sku)
        .bind(&input.name)
        .bind(input.qty)
        .bind(&input.unit_of_measure)
        .bind(&input.warehouse)
        .bind(&input.location)
        .bind(&input.image_ref)
        .bind(input.expiry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateKey(input.sku.clone())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(row.into())
    }

    async fn update_fields(
        &self,
        sku: &str,
        patch: InventoryPatch,
    ) -> AppResult<Option<InventoryRecord>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory
            SET name = COALESCE($2, name),
                qty = COALESCE($3, qty),
                unit_of_measure = COALESCE($4, unit_of_measure),
                warehouse = COALESCE($5, warehouse),
                location = COALESCE($6, location),
                image_ref = COALESCE($7, image_ref),
                expiry = COALESCE($8, expiry),
                updated_at = now()
            WHERE sku = $1
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(sku)
        .bind(&patch.name)
        .bind(patch.qty)
        .bind(&patch.unit_of_measure)
        .bind(&patch.warehouse)
        .bind(&patch.location)
        .bind(&patch.image_ref)
        .bind(patch.expiry)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InventoryRecord::from))
    }

    async fn delete(&self, sku: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inventory WHERE sku = $1")
            .bind(sku)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn adjust_quantity(&self, sku: &str, delta: i64) -> AppResult<InventoryRecord> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory
            SET qty = qty + $2, updated_at = now()
            WHERE sku = $1 AND qty + $2 >= 0
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(sku)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // The conditional update matched nothing: either the sku is
        // absent or the delta would take the quantity negative.
        let available = sqlx::query_scalar::<_, i64>("SELECT qty FROM inventory WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        Err(AppError::InsufficientStock {
            sku: sku.to_string(),
            available,
            requested: delta.abs(),
        })
    }

    async fn total_quantity(&self) -> AppResult<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(qty), 0)::BIGINT FROM inventory")
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    async fn low_stock_count(&self) -> AppResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inventory WHERE qty < $1")
                .bind(LOW_STOCK_THRESHOLD)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, sku, movement_type, qty, warehouse, occurred_at, actor, note";

#[async_trait]
impl TransactionLog for PgStore {
    async fn append(&self, movement: NewMovement) -> AppResult<TransactionRecord> {
        let occurred_at = movement.occurred_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (id, sku, movement_type, qty, warehouse, occurred_at, actor, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&movement.sku)
        .bind(movement.movement_type.as_str())
        .bind(movement.qty)
        .bind(&movement.warehouse)
        .bind(occurred_at)
        .bind(&movement.actor)
        .bind(&movement.note)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_descending(&self) -> AppResult<Vec<TransactionRecord>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions ORDER BY occurred_at DESC",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }
}

const TASK_COLUMNS: &str =
    "id, task_type, status, priority, sku, warehouse, created_at, due_at, assignee";

#[async_trait]
impl TaskStore for PgStore {
    async fn create(&self, record: TaskRecord) -> AppResult<TaskRecord> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (id, task_type, status, priority, sku, warehouse, created_at, due_at, assignee)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(record.id)
        .bind(record.task_type.as_str())
        .bind(record.status.as_str())
        .bind(record.priority.as_str())
        .bind(&record.payload.sku)
        .bind(&record.payload.warehouse)
        .bind(record.created_at)
        .bind(record.due_at)
        .bind(&record.assignee)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> AppResult<Vec<TaskRecord>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRecord::try_from).collect()
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> AppResult<Option<TaskRecord>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks
            SET task_type = COALESCE($2, task_type),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                sku = COALESCE($5, sku),
                warehouse = COALESCE($6, warehouse),
                due_at = COALESCE($7, due_at),
                assignee = COALESCE($8, assignee)
            WHERE id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(patch.task_type.map(|t| t.as_str()))
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.priority.map(|p| p.as_str()))
        .bind(patch.payload.as_ref().map(|p| p.sku.clone()))
        .bind(patch.payload.as_ref().map(|p| p.warehouse.clone()))
        .bind(patch.due_at)
        .bind(&patch.assignee)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
