//! Route handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use torrentmeta_core::ParseOutcome;

use crate::{AppState, ApiError};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub titles: Vec<String>,
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The registries are built before the listener binds, so a running server is ready.
pub async fn readyz() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}

/// `POST /v1/parse`
pub async fn parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Json<ParseOutcome> {
    Json(state.parser.parse(&request.title).into())
}

/// `POST /v1/parse_batch`: outcomes come back in request order.
pub async fn parse_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<Vec<ParseOutcome>>, ApiError> {
    let len = request.titles.len();
    if len > state.max_batch {
        return Err(ApiError::BatchTooLarge {
            len,
            max: state.max_batch,
        });
    }

    tracing::debug!(titles = len, "Parsing batch");
    Ok(Json(state.parser.parse_many(&request.titles)))
}
