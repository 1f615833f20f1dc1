//! Automation webhook client
//!
//! Forwards preprocessed message payloads to the external automation
//! endpoint and hands its JSON response back verbatim. The call has a
//! bounded timeout and is never retried; a timeout or non-success
//! status surfaces as a webhook error.

use reqwest::Client;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use shared::models::CandidatePayload;

/// Client for the fixed automation webhook URL.
#[derive(Clone)]
pub struct AutomationClient {
    client: Client,
    webhook_url: String,
}

impl AutomationClient {
    pub fn new(webhook_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Webhook(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// POST the candidate payload and return the webhook's response body.
    pub async fn forward(&self, payload: &CandidatePayload) -> AppResult<serde_json::Value> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Webhook(format!("webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Webhook(format!(
                "webhook returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Webhook(format!("failed to parse webhook response: {}", e)))
    }
}
