//! Inventory store and service tests

use proptest::prelude::*;
use std::sync::Arc;

use shared::models::{CreateInventoryInput, InventoryPatch, LOW_STOCK_THRESHOLD};
use wms_backend::error::AppError;
use wms_backend::services::inventory::InventoryService;
use wms_backend::store::{InventoryStore, MemoryStore};

fn item(sku: &str, qty: i64) -> CreateInventoryInput {
    CreateInventoryInput {
        sku: sku.to_string(),
        name: format!("Item {}", sku),
        qty,
        unit_of_measure: "EA".to_string(),
        warehouse: "WH01".to_string(),
        location: Some("A-01-01".to_string()),
        image_ref: None,
        expiry: None,
    }
}

fn service() -> (Arc<MemoryStore>, InventoryService) {
    let store = Arc::new(MemoryStore::new());
    let service = InventoryService::new(store.clone());
    (store, service)
}

// ============================================================================
// Store Tests
// ============================================================================

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = MemoryStore::new();

    let created = store.create(item("SP001", 20)).await.unwrap();
    assert_eq!(created.sku, "SP001");
    assert_eq!(created.qty, 20);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get("SP001").await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let store = MemoryStore::new();
    store.create(item("SP001", 20)).await.unwrap();

    let err = store.create(item("SP001", 5)).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));

    // The original record is untouched.
    assert_eq!(store.get("SP001").await.unwrap().unwrap().qty, 20);
}

#[tokio::test]
async fn list_is_sorted_by_sku() {
    let store = MemoryStore::new();
    for sku in ["SP003", "SP001", "SP002"] {
        store.create(item(sku, 1)).await.unwrap();
    }

    let records = store.list().await.unwrap();
    let skus: Vec<&str> = records.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["SP001", "SP002", "SP003"]);
}

#[tokio::test]
async fn update_fields_patches_only_named_fields() {
    let store = MemoryStore::new();
    let created = store.create(item("SP001", 20)).await.unwrap();

    let patch = InventoryPatch {
        name: Some("Renamed".to_string()),
        location: Some("B-02-03".to_string()),
        ..Default::default()
    };
    let updated = store.update_fields("SP001", patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.location.as_deref(), Some("B-02-03"));
    assert_eq!(updated.qty, 20);
    assert_eq!(updated.warehouse, created.warehouse);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_fields_on_missing_sku_returns_none() {
    let store = MemoryStore::new();
    let patch = InventoryPatch {
        name: Some("x".to_string()),
        ..Default::default()
    };
    assert!(store.update_fields("SP404", patch).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_reports_whether_record_existed() {
    let store = MemoryStore::new();
    store.create(item("SP001", 20)).await.unwrap();

    assert!(store.delete("SP001").await.unwrap());
    assert!(store.get("SP001").await.unwrap().is_none());
    assert!(!store.delete("SP001").await.unwrap());
}

#[tokio::test]
async fn adjust_quantity_applies_signed_delta() {
    let store = MemoryStore::new();
    store.create(item("SP001", 10)).await.unwrap();

    let up = store.adjust_quantity("SP001", 5).await.unwrap();
    assert_eq!(up.qty, 15);
    let down = store.adjust_quantity("SP001", -15).await.unwrap();
    assert_eq!(down.qty, 0);
}

#[tokio::test]
async fn adjust_quantity_never_goes_negative() {
    let store = MemoryStore::new();
    store.create(item("SP001", 10)).await.unwrap();

    let err = store.adjust_quantity("SP001", -11).await.unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(store.get("SP001").await.unwrap().unwrap().qty, 10);
}

#[tokio::test]
async fn adjust_quantity_rejects_overflowing_delta() {
    let store = MemoryStore::new();
    store.create(item("SP001", i64::MAX - 1)).await.unwrap();

    let err = store.adjust_quantity("SP001", 2).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.get("SP001").await.unwrap().unwrap().qty, i64::MAX - 1);
}

#[tokio::test]
async fn adjust_quantity_on_missing_sku_is_not_found() {
    let store = MemoryStore::new();
    let err = store.adjust_quantity("SP404", 5).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn low_stock_uses_strict_threshold() {
    let store = MemoryStore::new();
    // 5 is below, 10 is exactly at (not low), 15 is above.
    store.create(item("SP001", 5)).await.unwrap();
    store.create(item("SP002", 10)).await.unwrap();
    store.create(item("SP003", 15)).await.unwrap();

    assert_eq!(store.low_stock_count().await.unwrap(), 1);
}

#[tokio::test]
async fn total_quantity_over_empty_store_is_zero() {
    let store = MemoryStore::new();
    assert_eq!(store.total_quantity().await.unwrap(), 0);

    store.create(item("SP001", 7)).await.unwrap();
    store.create(item("SP002", 13)).await.unwrap();
    assert_eq!(store.total_quantity().await.unwrap(), 20);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn service_rejects_blank_sku() {
    let (_, service) = service();
    let err = service.create(item("", 5)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn service_rejects_negative_initial_quantity() {
    let (_, service) = service();
    let err = service.create(item("SP001", -1)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn service_rejects_empty_patch() {
    let (store, service) = service();
    store.create(item("SP001", 5)).await.unwrap();

    let err = service
        .update("SP001", InventoryPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn service_rejects_negative_quantity_patch() {
    let (store, service) = service();
    store.create(item("SP001", 5)).await.unwrap();

    let patch = InventoryPatch {
        qty: Some(-3),
        ..Default::default()
    };
    let err = service.update("SP001", patch).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.get("SP001").await.unwrap().unwrap().qty, 5);
}

#[tokio::test]
async fn service_maps_missing_records_to_not_found() {
    let (_, service) = service();

    assert!(matches!(
        service.get("SP404").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        service.delete("SP404").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The aggregates match a straightforward fold over the records.
    #[test]
    fn prop_aggregates_match_manual_fold(quantities in prop::collection::vec(0i64..100, 0..20)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (total, low) = rt.block_on(async {
            let store = MemoryStore::new();
            for (i, qty) in quantities.iter().enumerate() {
                store.create(item(&format!("SP{:03}", i), *qty)).await.unwrap();
            }
            (
                store.total_quantity().await.unwrap(),
                store.low_stock_count().await.unwrap(),
            )
        });

        let expected_total: i64 = quantities.iter().sum();
        let expected_low = quantities.iter().filter(|q| **q < LOW_STOCK_THRESHOLD).count() as i64;
        prop_assert_eq!(total, expected_total);
        prop_assert_eq!(low, expected_low);
    }
}
