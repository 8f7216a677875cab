//! Axum router construction.

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::middleware::require_api_key;
use crate::routes;

/// Build the application router.
///
/// Health checks stay open; the `/v1` routes sit behind the API key check.
/// The CORS layer wraps every route so preflights never reach the key check.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/v1/parse", post(routes::parse))
        .route("/v1/parse_batch", post(routes::parse_batch))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let app = Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/readyz", get(routes::readyz))
        .merge(api);
    let app = match state.cors.layer() {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
