//! Error types for the chat API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

/// Errors returned before a stream is opened.
///
/// Once streaming starts, failures are reported in-band as a recovery reply.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read as a chat request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
        };
        warn!(error = %self, "Rejected request");

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "type": kind
            }
        });

        (status, Json(body)).into_response()
    }
}
