//! Error-to-HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors a handler can surface to the client.
///
/// Invalid titles are not among them: they are answered with `200` and the
/// error marker inside the parse outcome.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing or invalid API key")]
    Unauthorized,

    #[error("batch of {len} titles exceeds the limit of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::BatchTooLarge { .. } => "batch_too_large",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "Rejected request");

        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (status, axum::Json(body)).into_response()
    }
}
