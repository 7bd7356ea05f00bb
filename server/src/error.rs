//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Errors surfaced by request handlers.
///
/// Scan failures are not translated for the caller: they become a bare
/// `500 Internal Server Error` and the details go to the log.
#[derive(Debug)]
pub enum ApiError {
    Scan(scanrelay_core::Error),
}

impl From<scanrelay_core::Error> for ApiError {
    fn from(err: scanrelay_core::Error) -> Self {
        ApiError::Scan(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Scan(err) => {
                error!(error = %err, "Scan request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
