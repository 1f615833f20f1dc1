//! Candidate payload shapes proposed by the message preprocessor
//!
//! These mirror the JSON the automation webhook expects: metadata about
//! the raw message plus three candidate sections, each populated only
//! when its trigger keywords were present in the text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{TaskStatus, TaskType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageMeta {
    pub session_id: Option<String>,
    pub raw_message: String,
}

/// Candidate inventory lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCandidate {
    pub sku: Option<String>,
    pub warehouse: Option<String>,
}

/// Candidate stock movement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCandidate {
    pub sku: Option<String>,
    pub qty: Option<i64>,
    pub warehouse: Option<String>,
    pub actor: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Candidate operational task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCandidate {
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub sku: Option<String>,
    pub warehouse: Option<String>,
}

/// The full payload forwarded to the automation webhook. The
/// preprocessor only proposes it; submitting any part of it to the
/// stores is the caller's decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub meta: MessageMeta,
    pub inventory: InventoryCandidate,
    pub transaction: TransactionCandidate,
    pub task: TaskCandidate,
}
