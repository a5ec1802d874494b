//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use footprint_core::error::FootprintError;

/// Body of a 400 for a non-numeric `minHeight`.
pub const INVALID_MIN_HEIGHT: &str = "minHeight must be a number.";

/// Body of a 400 for a malformed `bbox`.
pub const INVALID_BBOX: &str =
    "bbox must be four comma-separated numbers: minLon,minLat,maxLon,maxLat";

const INTERNAL_ERROR: &str = "Internal server error";

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Internal server error. The cause is logged, never sent.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<FootprintError> for ApiError {
    fn from(err: FootprintError) -> Self {
        match &err {
            FootprintError::InvalidBBox(raw) => {
                tracing::debug!(bbox = %raw, "Rejected bbox");
                ApiError::bad_request(INVALID_BBOX)
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal()
            }
        }
    }
}
