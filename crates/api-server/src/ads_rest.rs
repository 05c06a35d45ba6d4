//! Ad console endpoints: campaigns, placements and slot resolution.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use starlight_ads::models::{AdOverview, CreateAdRequest, SetPlacementRequest, SlotPlacement, UpdateStatusRequest};
use starlight_core::{AdSlot, Campaign};

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub slot: AdSlot,
    pub campaign: Option<Campaign>,
}

pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    Json(state.console.list_campaigns())
}

pub async fn get_campaign(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Campaign>> {
    state
        .console
        .get_campaign(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("campaign {id}")))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateAdRequest>,
) -> ApiResult<(StatusCode, Json<Campaign>)> {
    let campaign = state.console.create_campaign(req)?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// POST /api/v1/ads/suggestions — keep a studio suggestion as a user campaign.
pub async fn save_suggestion(
    State(state): State<AppState>,
    Json(campaign): Json<Campaign>,
) -> ApiResult<(StatusCode, Json<Campaign>)> {
    let saved = state.console.save_suggestion(campaign)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn delete_campaign(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if state.console.delete_campaign(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("campaign {id}")))
    }
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.console.set_status(&id, req.status)?))
}

pub async fn overview(State(state): State<AppState>) -> Json<AdOverview> {
    Json(state.console.overview())
}

// ─── Placements ────────────────────────────────────────────────────────────

pub async fn list_placements(State(state): State<AppState>) -> Json<Vec<SlotPlacement>> {
    Json(state.console.placements())
}

pub async fn set_placement(
    State(state): State<AppState>,
    Json(req): Json<SetPlacementRequest>,
) -> ApiResult<Json<Vec<SlotPlacement>>> {
    state.console.set_placement(req)?;
    Ok(Json(state.console.placements()))
}

/// GET /api/v1/ads/slots/:slot — e.g. `HOME_SIDEBAR`.
pub async fn resolve_slot(State(state): State<AppState>, Path(slot): Path<String>) -> ApiResult<Json<SlotResponse>> {
    let slot: AdSlot = slot.parse().map_err(|e: starlight_core::slots::UnknownSlot| ApiError::bad_request(e.to_string()))?;
    let campaign = state.console.resolver().resolve(slot);
    Ok(Json(SlotResponse { slot, campaign }))
}
