//! API key check for the `/v1` routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::{AppState, ApiError};

/// Header carrying the caller's key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `x-api-key` does not match the configured key.
/// Passes everything through when no key is configured.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == expected => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}
