//! Error handling for the Warehouse Management backend
//!
//! Every failure surfaces once as a uniform JSON body `{message, error?}`
//! with the status codes the API promises: 400 for bad input, 401 for
//! auth, 404 for missing entities, 409 for duplicate keys, 500 for
//! storage or webhook trouble.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock for sku {sku}: {available} available, {requested} requested")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Authorization errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Uniform error response body
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: msg.clone(),
                    error: None,
                },
            ),
            AppError::InsufficientStock { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Insufficient inventory for outbound transaction".to_string(),
                    error: Some(self.to_string()),
                },
            ),
            AppError::DuplicateKey(sku) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    message: format!("A record with sku {} already exists", sku),
                    error: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: format!("{} not found", resource),
                    error: None,
                },
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message: format!("Unauthorized: {}", msg),
                    error: None,
                },
            ),
            // Raw storage detail stays server-side; clients get a flat message.
            AppError::Storage(_) | AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: "A storage error occurred".to_string(),
                    error: None,
                },
            ),
            AppError::Webhook(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: "Cannot send webhook".to_string(),
                    error: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: "An internal server error occurred".to_string(),
                    error: None,
                },
            ),
        };

        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
