//! Task CRUD service
//!
//! Enum-valued fields arrive as plain strings and are parsed here, so
//! out-of-enum values surface as validation errors rather than body
//! deserialization failures.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::TaskStore;
use shared::models::{
    TaskPatch, TaskPayload, TaskPriority, TaskRecord, TaskStatus, TaskType,
};
use shared::validation::{validate_sku, validate_warehouse};

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

/// Request body for creating a task. Status and priority fall back to
/// the schema defaults (open, normal) when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub payload: Option<TaskPayloadInput>,
    pub due_at: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayloadInput {
    pub sku: Option<String>,
    pub warehouse: Option<String>,
}

/// Request body for a partial task update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub payload: Option<TaskPayloadInput>,
    pub due_at: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
}

fn parse_field<T>(value: &str, field: &str) -> AppResult<T>
where
    T: std::str::FromStr,
{
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid {}: {}", field, value)))
}

fn parse_payload(payload: TaskPayloadInput) -> AppResult<TaskPayload> {
    let sku = payload
        .sku
        .ok_or_else(|| AppError::Validation("payload must contain sku".to_string()))?;
    let warehouse = payload
        .warehouse
        .ok_or_else(|| AppError::Validation("payload must contain warehouse".to_string()))?;
    validate_sku(&sku).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_warehouse(&warehouse).map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(TaskPayload { sku, warehouse })
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<TaskRecord>> {
        self.store.list().await
    }

    pub async fn create(&self, input: CreateTaskInput) -> AppResult<TaskRecord> {
        let task_type: TaskType = input
            .task_type
            .as_deref()
            .map(|t| parse_field(t, "task type"))
            .transpose()?
            .ok_or_else(|| AppError::Validation("type is required".to_string()))?;
        let status = match input.status.as_deref() {
            Some(s) => parse_field(s, "status")?,
            None => TaskStatus::Open,
        };
        let priority = match input.priority.as_deref() {
            Some(p) => parse_field(p, "priority")?,
            None => TaskPriority::Normal,
        };
        let payload = parse_payload(
            input
                .payload
                .ok_or_else(|| AppError::Validation("payload is required".to_string()))?,
        )?;

        let record = TaskRecord {
            id: Uuid::new_v4(),
            task_type,
            status,
            priority,
            payload,
            created_at: Utc::now(),
            due_at: input.due_at,
            assignee: input.assignee,
        };
        self.store.create(record).await
    }

    pub async fn update(&self, id: Uuid, input: UpdateTaskInput) -> AppResult<TaskRecord> {
        let patch = TaskPatch {
            task_type: input
                .task_type
                .as_deref()
                .map(|t| parse_field::<TaskType>(t, "task type"))
                .transpose()?,
            status: input
                .status
                .as_deref()
                .map(|s| parse_field::<TaskStatus>(s, "status"))
                .transpose()?,
            priority: input
                .priority
                .as_deref()
                .map(|p| parse_field::<TaskPriority>(p, "priority"))
                .transpose()?,
            payload: input.payload.map(parse_payload).transpose()?,
            due_at: input.due_at,
            assignee: input.assignee,
        };

        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("Task".to_string()));
        }
        Ok(())
    }
}
