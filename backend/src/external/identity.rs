//! External identity service integration
//!
//! Bearer tokens are not decoded locally; they are handed to a separate
//! identity service for verification. The trait seam lets tests inject
//! a static verifier instead of a live endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// The identity the external service vouched for.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub subject: String,
}

/// Verifies bearer tokens against an identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<VerifiedIdentity>;
}

/// Token verifier backed by an HTTP identity service.
#[derive(Clone)]
pub struct RemoteTokenVerifier {
    client: Client,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    subject: String,
}

impl RemoteTokenVerifier {
    pub fn new(verify_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Storage(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, verify_url })
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> AppResult<VerifiedIdentity> {
        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Unauthorized(format!("token verification failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        Ok(VerifiedIdentity {
            subject: body.subject,
        })
    }
}
