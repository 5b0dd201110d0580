use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use common::Error;

/// Error body returned by every endpoint: `{"status":"error","message":...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, message) = match &err {
            Error::Provider(_) | Error::InvalidTimeframe(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid JSON from Twelve Data".to_string(),
            ),
            Error::MissingValues
            | Error::NoCandles
            | Error::TooFewCandles(_)
            | Error::NoValidCandles => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Http(_) | Error::Config(_) | Error::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {err}"),
            ),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        }
        (
            self.status,
            Json(json!({ "status": "error", "message": self.message })),
        )
            .into_response()
    }
}
