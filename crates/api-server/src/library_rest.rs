//! Viewer collections: uploads, watch later, playlists, history, reports and
//! the session intro flag.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use starlight_core::types::{Playlist, Report, ReportReason};
use starlight_core::Video;
use uuid::Uuid;

const DEFAULT_REPORTER: &str = "anonymous";

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub is_short: bool,
}

impl UploadRequest {
    fn into_video(self) -> Video {
        Video {
            id: format!("upload-{}", Uuid::new_v4()),
            title: self.title.trim().to_string(),
            thumbnail_url: self.thumbnail_url,
            channel_name: self.channel_name.unwrap_or_else(|| "Your channel".to_string()),
            channel_avatar_url: String::new(),
            community_name: None,
            community_avatar_url: None,
            views: "0 views".to_string(),
            upload_time: "just now".to_string(),
            upload_date: Some(Utc::now().to_rfc3339()),
            duration: self.duration,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            country: self.country,
            state: self.state,
            city: self.city,
            is_short: Some(self.is_short),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub video: Video,
    pub reason: ReportReason,
    #[serde(default)]
    pub reporter_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroResponse {
    pub show_intro: bool,
}

#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub added: bool,
}

fn deleted(removed: bool, what: &str, id: &str) -> ApiResult<StatusCode> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("{what} {id}")))
    }
}

// ─── Uploads ───────────────────────────────────────────────────────────────

pub async fn list_uploads(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.library.uploads())
}

pub async fn create_upload(
    State(state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let video = state.library.save_upload(req.into_video())?;
    metrics::counter!("library.uploads.created").increment(1);
    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn delete_upload(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    deleted(state.library.delete_upload(&id)?, "upload", &id)
}

// ─── Watch later ───────────────────────────────────────────────────────────

pub async fn list_watch_later(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.library.watch_later())
}

pub async fn add_watch_later(State(state): State<AppState>, Json(video): Json<Video>) -> ApiResult<Json<AddedResponse>> {
    let added = state.library.add_to_watch_later(video)?;
    Ok(Json(AddedResponse { added }))
}

pub async fn remove_watch_later(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    deleted(state.library.remove_from_watch_later(&id)?, "watch-later video", &id)
}

// ─── Playlists ─────────────────────────────────────────────────────────────

pub async fn list_playlists(State(state): State<AppState>) -> Json<Vec<Playlist>> {
    Json(state.library.playlists())
}

pub async fn create_playlist(
    State(state): State<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> ApiResult<(StatusCode, Json<Playlist>)> {
    let playlist = state.library.create_playlist(&req.name)?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

pub async fn add_to_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(video): Json<Video>,
) -> ApiResult<Json<Playlist>> {
    Ok(Json(state.library.add_to_playlist(&id, video)?))
}

pub async fn remove_from_playlist(
    State(state): State<AppState>,
    Path((id, video_id)): Path<(String, String)>,
) -> ApiResult<Json<Playlist>> {
    Ok(Json(state.library.remove_from_playlist(&id, &video_id)?))
}

pub async fn delete_playlist(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    deleted(state.library.delete_playlist(&id)?, "playlist", &id)
}

// ─── History ───────────────────────────────────────────────────────────────

pub async fn list_history(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.library.history())
}

pub async fn record_watch(State(state): State<AppState>, Json(video): Json<Video>) -> ApiResult<StatusCode> {
    state.library.record_watch(video)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_history(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.library.clear_history()?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Reports ───────────────────────────────────────────────────────────────

pub async fn list_reports(State(state): State<AppState>) -> Json<Vec<Report>> {
    Json(state.library.reports())
}

pub async fn submit_report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    let reporter = req.reporter_id.as_deref().unwrap_or(DEFAULT_REPORTER);
    let report = state.library.submit_report(req.video, req.reason, reporter)?;
    Ok((StatusCode::CREATED, Json(report)))
}

// ─── Session ───────────────────────────────────────────────────────────────

/// GET /api/v1/session/intro — true only on the first call of a session.
pub async fn intro(State(state): State<AppState>) -> ApiResult<Json<IntroResponse>> {
    let show_intro = state.library.take_intro()?;
    Ok(Json(IntroResponse { show_intro }))
}
