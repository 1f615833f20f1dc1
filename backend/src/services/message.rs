//! Free-text message preprocessor
//!
//! A deterministic, side-effect-free pattern extractor. Given the raw
//! text it proposes up to three candidate payloads (inventory lookup,
//! stock movement, task) for the automation webhook; a section is only
//! populated when its trigger keywords appear. It never touches the
//! stores itself.

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

use shared::models::{CandidatePayload, MessageMeta, TaskStatus, TaskType};

static SKU_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SP\d{3}").expect("hard-coded pattern"));
static WAREHOUSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WH\d{2}").expect("hard-coded pattern"));
static QTY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(cái|EA|pcs)").expect("hard-coded pattern"));
static ACTOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)student\d{2}").expect("hard-coded pattern"));

static INVENTORY_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tồn kho|inventory").expect("hard-coded pattern"));
static TRANSACTION_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nhập kho|xuất kho|giao").expect("hard-coded pattern"));
static TASK_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)kiểm kê|cycle_count").expect("hard-coded pattern"));

/// Apply the fixed extraction rules to a free-text message.
pub fn preprocess_message(message: &str, session_id: Option<String>) -> CandidatePayload {
    let sku = SKU_PATTERN.find(message).map(|m| m.as_str().to_string());
    let warehouse = WAREHOUSE_PATTERN
        .find(message)
        .map(|m| m.as_str().to_string());
    let qty = QTY_PATTERN
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok());
    let actor = ACTOR_PATTERN.find(message).map(|m| m.as_str().to_string());

    let mut payload = CandidatePayload {
        meta: MessageMeta {
            session_id,
            raw_message: message.to_string(),
        },
        inventory: Default::default(),
        transaction: Default::default(),
        task: Default::default(),
    };

    if INVENTORY_TRIGGER.is_match(message) {
        payload.inventory.sku = sku.clone();
        payload.inventory.warehouse = warehouse.clone();
    }

    if TRANSACTION_TRIGGER.is_match(message) {
        payload.transaction.occurred_at = Some(Utc::now());
        payload.transaction.sku = sku.clone();
        payload.transaction.qty = qty;
        payload.transaction.warehouse = warehouse.clone();
        payload.transaction.actor = actor;
    }

    if TASK_TRIGGER.is_match(message) {
        payload.task.task_type = Some(TaskType::CycleCount);
        payload.task.status = Some(TaskStatus::Open);
        payload.task.created_at = Some(Utc::now());
        payload.task.sku = sku;
        payload.task.warehouse = warehouse;
    }

    payload
}
