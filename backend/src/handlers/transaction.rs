//! HTTP handlers for stock-movement endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::CurrentActor;
use crate::services::transaction::{MovementInput, MovementOutcome, TransactionService};
use crate::AppState;
use shared::models::TransactionRecord;

/// Record a stock movement through the transaction processor
pub async fn add_transaction(
    State(state): State<AppState>,
    current_actor: CurrentActor,
    AppJson(mut input): AppJson<MovementInput>,
) -> AppResult<Json<MovementOutcome>> {
    // When the body names no actor, attribute the movement to the
    // verified identity.
    if input.actor.is_none() {
        input.actor = Some(current_actor.0.subject);
    }

    let service = TransactionService::new(state.inventory, state.transactions);
    Ok(Json(service.apply_movement(input).await?))
}

/// List all movements, most recent first
pub async fn get_transactions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionRecord>>> {
    let service = TransactionService::new(state.inventory, state.transactions);
    Ok(Json(service.list_movements().await?))
}
