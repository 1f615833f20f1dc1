//! Authentication middleware
//!
//! Extracts the bearer token from the Authorization header and hands it
//! to the injected token verifier. Mutating routes are wrapped with
//! this layer; everything else stays public.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, ErrorBody};
use crate::external::VerifiedIdentity;
use crate::AppState;

/// Middleware that requires a valid bearer token.
///
/// On success the verified identity lands in the request extensions for
/// handlers to pick up via [`CurrentActor`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return AppError::Unauthorized("No token provided".to_string()).into_response();
        }
    };

    let identity = match state.verifier.verify(token).await {
        Ok(identity) => identity,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Extractor for the verified identity on protected routes.
#[derive(Clone, Debug)]
pub struct CurrentActor(pub VerifiedIdentity);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .map(CurrentActor)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorBody {
                        message: "Unauthorized: authentication required".to_string(),
                        error: None,
                    }),
                )
            })
    }
}
