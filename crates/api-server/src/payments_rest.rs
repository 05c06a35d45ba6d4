//! Payments mockup endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use starlight_core::types::Transaction;
use starlight_payments::{LedgerSummary, ProcessOutcome};

pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.payments.list())
}

pub async fn summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    Json(state.payments.summary())
}

/// POST /api/v1/payments/transactions/:id/process
pub async fn process(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<ProcessOutcome>> {
    state
        .payments
        .process(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("transaction {id}")))
}
