//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/health` - Basic liveness probe (immediate 200, no checks)
//! - `/health/ready` - Readiness probe (startup seeding has run)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// GET /health - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready - Readiness probe.
///
/// Ready once the startup seed has run, whatever its outcome.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.seeder.outcome() {
        Some(outcome) => (
            StatusCode::OK,
            Json(json!({ "ready": true, "seed": outcome })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ready": false })),
        ),
    }
}
