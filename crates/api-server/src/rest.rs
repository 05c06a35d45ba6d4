//! Operational endpoints.

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — ready while storage is reachable. Having no campaigns is
/// not a readiness failure.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage.ping() {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "Storage unreachable, not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
