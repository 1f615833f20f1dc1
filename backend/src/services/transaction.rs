//! Transaction processor: couples movement records to inventory deltas
//!
//! This is the only writer that touches both the transaction log and an
//! inventory quantity. Validation happens before any write; the
//! quantity delta is applied through the store's atomic adjustment and
//! the movement is logged only after the delta stuck, with a
//! compensating adjustment if the append fails. Either both effects
//! land or neither does, so the log never carries a movement without a
//! matching inventory delta and quantities never go negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, TransactionLog};
use shared::models::{InventoryRecord, MovementType, NewMovement, TransactionRecord};
use shared::validation::{validate_movement_qty, validate_sku, validate_warehouse};

/// The transaction processor.
#[derive(Clone)]
pub struct TransactionService {
    inventory: Arc<dyn InventoryStore>,
    log: Arc<dyn TransactionLog>,
}

/// Request body for recording a stock movement.
///
/// `type` arrives as a plain string so an out-of-enum value fails our
/// validation (400) instead of body deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementInput {
    pub sku: String,
    #[serde(rename = "type")]
    pub movement_type: String,
    pub qty: i64,
    pub warehouse: String,
    pub actor: Option<String>,
    pub note: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Combined result of a recorded movement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementOutcome {
    pub message: String,
    pub transaction: TransactionRecord,
    pub updated_inventory: InventoryRecord,
}

/// Signed inventory delta for a movement.
///
/// `adjustment` is declared in the wire vocabulary but has no defined
/// quantity semantics yet, so it is rejected rather than guessed at.
pub fn movement_delta(movement_type: MovementType, qty: i64) -> AppResult<i64> {
    match movement_type {
        MovementType::Inbound => Ok(qty),
        MovementType::Outbound => Ok(-qty),
        MovementType::Adjustment => Err(AppError::Validation(
            "adjustment transactions are not supported: no quantity semantics defined".to_string(),
        )),
    }
}

impl TransactionService {
    pub fn new(inventory: Arc<dyn InventoryStore>, log: Arc<dyn TransactionLog>) -> Self {
        Self { inventory, log }
    }

    /// Validate a movement request, apply its delta, and log it.
    ///
    /// Failure modes, in order, none of which leave partial state:
    /// validation errors (400), unknown sku (404), insufficient stock
    /// for an outbound (400).
    pub async fn apply_movement(&self, input: MovementInput) -> AppResult<MovementOutcome> {
        let movement_type: MovementType = input.movement_type.parse().map_err(|_| {
            AppError::Validation(format!("Invalid transaction type: {}", input.movement_type))
        })?;
        validate_sku(&input.sku).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_warehouse(&input.warehouse).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_movement_qty(input.qty).map_err(|e| AppError::Validation(e.to_string()))?;

        let delta = movement_delta(movement_type, input.qty)?;

        // Atomic read-check-write; fails NotFound or InsufficientStock
        // without mutating anything, so no log entry is written either.
        let updated_inventory = self.inventory.adjust_quantity(&input.sku, delta).await?;

        let movement = NewMovement {
            sku: input.sku.clone(),
            movement_type,
            qty: input.qty,
            warehouse: input.warehouse,
            occurred_at: input.occurred_at,
            actor: input.actor,
            note: input.note,
        };

        match self.log.append(movement).await {
            Ok(transaction) => Ok(MovementOutcome {
                message: "Transaction added successfully".to_string(),
                transaction,
                updated_inventory,
            }),
            Err(append_err) => {
                // The delta landed but the movement record did not:
                // compensate so no applied delta is left unlogged.
                if let Err(rollback_err) = self.inventory.adjust_quantity(&input.sku, -delta).await
                {
                    tracing::error!(
                        sku = %input.sku,
                        delta,
                        error = %rollback_err,
                        "failed to roll back inventory delta after log append failure"
                    );
                }
                Err(append_err)
            }
        }
    }

    /// All recorded movements, most recent first.
    pub async fn list_movements(&self) -> AppResult<Vec<TransactionRecord>> {
        self.log.list_descending().await
    }
}
