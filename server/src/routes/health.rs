//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`. Independent of the scanner.
pub async fn handle() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
