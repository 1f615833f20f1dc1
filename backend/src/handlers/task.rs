//! HTTP handlers for task endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::task::{CreateTaskInput, TaskService, UpdateTaskInput};
use crate::AppState;
use shared::models::TaskRecord;

/// List all tasks
pub async fn get_tasks(State(state): State<AppState>) -> AppResult<Json<Vec<TaskRecord>>> {
    let service = TaskService::new(state.tasks);
    Ok(Json(service.list().await?))
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskInput>,
) -> AppResult<Json<TaskRecord>> {
    let service = TaskService::new(state.tasks);
    Ok(Json(service.create(input).await?))
}

/// Patch a task by id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<UpdateTaskInput>,
) -> AppResult<Json<TaskRecord>> {
    let service = TaskService::new(state.tasks);
    Ok(Json(service.update(id, input).await?))
}

/// Delete a task by id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = TaskService::new(state.tasks);
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Task deleted successfully"
    })))
}
