//! Task service tests

use std::sync::Arc;
use uuid::Uuid;

use shared::models::{TaskPriority, TaskStatus, TaskType};
use wms_backend::error::AppError;
use wms_backend::services::task::{CreateTaskInput, TaskPayloadInput, TaskService, UpdateTaskInput};
use wms_backend::store::MemoryStore;

fn service() -> TaskService {
    TaskService::new(Arc::new(MemoryStore::new()))
}

fn payload() -> TaskPayloadInput {
    TaskPayloadInput {
        sku: Some("SP001".to_string()),
        warehouse: Some("WH01".to_string()),
    }
}

fn create_input(task_type: &str) -> CreateTaskInput {
    CreateTaskInput {
        task_type: Some(task_type.to_string()),
        status: None,
        priority: None,
        payload: Some(payload()),
        due_at: None,
        assignee: None,
    }
}

#[tokio::test]
async fn create_falls_back_to_schema_defaults() {
    let service = service();

    let task = service.create(create_input("putaway")).await.unwrap();

    assert_eq!(task.task_type, TaskType::Putaway);
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.priority, TaskPriority::Normal);
    assert_eq!(task.payload.sku, "SP001");
    assert!(task.due_at.is_none());
    assert!(task.assignee.is_none());
}

#[tokio::test]
async fn create_honors_explicit_status_and_priority() {
    let service = service();

    let mut input = create_input("pick");
    input.status = Some("done".to_string());
    input.priority = Some("high".to_string());
    input.assignee = Some("student02".to_string());
    let task = service.create(input).await.unwrap();

    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.assignee.as_deref(), Some("student02"));
}

#[tokio::test]
async fn create_requires_type_and_payload() {
    let service = service();

    let mut no_type = create_input("putaway");
    no_type.task_type = None;
    assert!(matches!(
        service.create(no_type).await.unwrap_err(),
        AppError::Validation(_)
    ));

    let mut no_payload = create_input("putaway");
    no_payload.payload = None;
    assert!(matches!(
        service.create(no_payload).await.unwrap_err(),
        AppError::Validation(_)
    ));
}

#[tokio::test]
async fn create_requires_complete_payload() {
    let service = service();

    let mut input = create_input("cycle_count");
    input.payload = Some(TaskPayloadInput {
        sku: Some("SP001".to_string()),
        warehouse: None,
    });

    assert!(matches!(
        service.create(input).await.unwrap_err(),
        AppError::Validation(_)
    ));
}

#[tokio::test]
async fn out_of_enum_values_are_validation_errors() {
    let service = service();

    for (field, value) in [("type", "teleport"), ("status", "pending"), ("priority", "urgent")] {
        let mut input = create_input("putaway");
        match field {
            "type" => input.task_type = Some(value.to_string()),
            "status" => input.status = Some(value.to_string()),
            _ => input.priority = Some(value.to_string()),
        }
        assert!(matches!(
            service.create(input).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }
}

#[tokio::test]
async fn update_patches_only_named_fields() {
    let service = service();
    let task = service.create(create_input("cycle_count")).await.unwrap();

    let updated = service
        .update(
            task.id,
            UpdateTaskInput {
                status: Some("done".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.task_type, task.task_type);
    assert_eq!(updated.priority, task.priority);
    assert_eq!(updated.payload, task.payload);
}

#[tokio::test]
async fn update_rejects_out_of_enum_status() {
    let service = service();
    let task = service.create(create_input("pick")).await.unwrap();

    let err = service
        .update(
            task.id,
            UpdateTaskInput {
                status: Some("cancelled".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let service = service();

    let err = service
        .update(
            Uuid::new_v4(),
            UpdateTaskInput {
                status: Some("done".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_task_then_reports_not_found() {
    let service = service();
    let task = service.create(create_input("putaway")).await.unwrap();

    service.delete(task.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());

    let err = service.delete(task.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_returns_all_created_tasks() {
    let service = service();
    for task_type in ["putaway", "pick", "cycle_count"] {
        service.create(create_input(task_type)).await.unwrap();
    }

    assert_eq!(service.list().await.unwrap().len(), 3);
}
