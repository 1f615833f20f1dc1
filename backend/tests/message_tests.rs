//! Message preprocessor tests
//!
//! The preprocessor is a pure function, so these tests cover the
//! extraction rules directly: one trigger keyword set per candidate
//! section, fixed token patterns for sku/warehouse/qty/actor.

use proptest::prelude::*;

use shared::models::{InventoryCandidate, TaskStatus, TaskType, TransactionCandidate};
use wms_backend::services::message::preprocess_message;

#[test]
fn inventory_trigger_fills_lookup_section() {
    let payload = preprocess_message("Kiểm tra tồn kho SP001 tại WH01", None);

    assert_eq!(payload.inventory.sku.as_deref(), Some("SP001"));
    assert_eq!(payload.inventory.warehouse.as_deref(), Some("WH01"));
    assert_eq!(payload.transaction, TransactionCandidate::default());
    assert!(payload.task.task_type.is_none());
}

#[test]
fn english_inventory_keyword_also_triggers() {
    let payload = preprocess_message("please check inventory for SP010", None);

    assert_eq!(payload.inventory.sku.as_deref(), Some("SP010"));
    assert!(payload.inventory.warehouse.is_none());
}

#[test]
fn transaction_trigger_fills_movement_section() {
    let payload = preprocess_message("xuất kho 5 EA SP002 từ WH02 bởi student01", None);

    assert_eq!(payload.transaction.sku.as_deref(), Some("SP002"));
    assert_eq!(payload.transaction.qty, Some(5));
    assert_eq!(payload.transaction.warehouse.as_deref(), Some("WH02"));
    assert_eq!(payload.transaction.actor.as_deref(), Some("student01"));
    assert!(payload.transaction.occurred_at.is_some());
    assert_eq!(payload.inventory, InventoryCandidate::default());
}

#[test]
fn token_patterns_match_case_insensitively() {
    let payload = preprocess_message("nhập kho 10 pcs sp003 vào wh07", None);

    // Matched text keeps the casing it appeared with.
    assert_eq!(payload.transaction.sku.as_deref(), Some("sp003"));
    assert_eq!(payload.transaction.warehouse.as_deref(), Some("wh07"));
    assert_eq!(payload.transaction.qty, Some(10));
}

#[test]
fn quantity_requires_a_unit_suffix() {
    let payload = preprocess_message("xuất kho 7 SP001", None);
    assert!(payload.transaction.qty.is_none());
}

#[test]
fn vietnamese_unit_is_recognized() {
    let payload = preprocess_message("giao 3 cái SP005", None);
    assert_eq!(payload.transaction.qty, Some(3));
}

#[test]
fn task_trigger_proposes_open_cycle_count() {
    let payload = preprocess_message("kiểm kê SP003 tại WH05", None);

    assert_eq!(payload.task.task_type, Some(TaskType::CycleCount));
    assert_eq!(payload.task.status, Some(TaskStatus::Open));
    assert!(payload.task.created_at.is_some());
    assert_eq!(payload.task.sku.as_deref(), Some("SP003"));
    assert_eq!(payload.task.warehouse.as_deref(), Some("WH05"));
}

#[test]
fn tokens_without_a_trigger_leave_sections_empty() {
    // SP001 and WH01 appear, but no keyword does.
    let payload = preprocess_message("SP001 WH01 hello", None);

    assert_eq!(payload.inventory, InventoryCandidate::default());
    assert_eq!(payload.transaction, TransactionCandidate::default());
    assert!(payload.task.task_type.is_none());
    assert_eq!(payload.meta.raw_message, "SP001 WH01 hello");
}

#[test]
fn multiple_triggers_fill_multiple_sections() {
    let payload = preprocess_message("xuất kho 2 EA SP001, sau đó kiểm kê WH01", None);

    assert_eq!(payload.transaction.qty, Some(2));
    assert_eq!(payload.task.task_type, Some(TaskType::CycleCount));
}

#[test]
fn session_id_is_carried_through() {
    let payload = preprocess_message("tồn kho SP001", Some("session-42".to_string()));
    assert_eq!(payload.meta.session_id.as_deref(), Some("session-42"));
}

#[test]
fn payload_serializes_with_webhook_field_names() {
    let payload = preprocess_message("tồn kho SP001", Some("s1".to_string()));
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["meta"]["sessionId"], "s1");
    assert_eq!(value["meta"]["rawMessage"], "tồn kho SP001");
    assert_eq!(value["inventory"]["sku"], "SP001");
    assert_eq!(value["task"]["type"], serde_json::Value::Null);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The preprocessor accepts any text without panicking and always
    /// echoes it back in the metadata.
    #[test]
    fn prop_any_text_is_handled(message in ".*") {
        let payload = preprocess_message(&message, None);
        prop_assert_eq!(payload.meta.raw_message, message);
    }
}
