//! Stock-movement transaction records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Direction of a stock movement.
///
/// `Adjustment` is part of the wire vocabulary but carries no defined
/// quantity semantics yet; the processor rejects it until one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Inbound,
    Outbound,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "inbound",
            MovementType::Outbound => "outbound",
            MovementType::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(MovementType::Inbound),
            "outbound" => Ok(MovementType::Outbound),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Error for enum parses from untyped request fields.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

/// A recorded stock movement. Immutable once created; written only by
/// the transaction processor as part of applying the inventory delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Uuid,
    pub sku: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub qty: i64,
    pub warehouse: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A movement about to be appended to the log. The log assigns the id
/// and, when `occurred_at` is absent, the occurrence timestamp.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub sku: String,
    pub movement_type: MovementType,
    pub qty: i64,
    pub warehouse: String,
    pub occurred_at: Option<DateTime<Utc>>,
    pub actor: Option<String>,
    pub note: Option<String>,
}
