//! HTTP handler for the free-text message intake channel

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::services::message::preprocess_message;
use crate::AppState;

/// Request body for the message intake endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInput {
    pub message: Option<String>,
    pub session_id: Option<String>,
}

/// Preprocess a free-text message and forward it to the automation
/// webhook, returning the webhook's response body verbatim.
pub async fn handle_message(
    State(state): State<AppState>,
    AppJson(input): AppJson<MessageInput>,
) -> AppResult<Json<serde_json::Value>> {
    let message = input
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Message is required".to_string()))?;

    let payload = preprocess_message(&message, input.session_id);
    let response = state.automation.forward(&payload).await?;

    Ok(Json(response))
}
