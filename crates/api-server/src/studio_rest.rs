//! Creator studio: generative helpers, video generation jobs, press release
//! and the copyright quiz.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use starlight_core::quiz::{self, QuizQuestion, QuizResult};
use starlight_core::types::PressRelease;
use starlight_core::Campaign;
use starlight_genai::{AdCopy, VideoJob};
use tracing::warn;

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AdCopyRequest {
    pub product: String,
    #[serde(default)]
    pub audience: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct BriefRequest {
    pub brief: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizParams {
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// One entry per question, in question order; `null` for unanswered.
    pub answers: Vec<Option<usize>>,
}

fn required<'a>(value: &'a str, field: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::bad_request(format!("'{field}' is required")))
    } else {
        Ok(trimmed)
    }
}

// ─── Generative helpers ────────────────────────────────────────────────────

pub async fn ad_copy(State(state): State<AppState>, Json(req): Json<AdCopyRequest>) -> ApiResult<Json<AdCopy>> {
    let product = required(&req.product, "product")?;
    let audience = if req.audience.trim().is_empty() { "a general audience" } else { req.audience.trim() };
    Ok(Json(state.genai.generate_ad_copy(product, audience).await))
}

pub async fn thumbnail(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> ApiResult<Json<ThumbnailResponse>> {
    let prompt = required(&req.prompt, "prompt")?;
    let image_url = state.genai.generate_thumbnail(prompt).await;
    Ok(Json(ThumbnailResponse { image_url }))
}

pub async fn campaign_suggestions(
    State(state): State<AppState>,
    Json(req): Json<BriefRequest>,
) -> ApiResult<Json<Vec<Campaign>>> {
    let brief = required(&req.brief, "brief")?;
    Ok(Json(state.genai.suggest_campaigns(brief).await))
}

// ─── Video generation ──────────────────────────────────────────────────────

pub async fn start_video(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> ApiResult<(StatusCode, Json<VideoJob>)> {
    let prompt = required(&req.prompt, "prompt")?;
    let job = state.videos.start(prompt.to_string());
    Ok((StatusCode::ACCEPTED, Json(job)))
}

pub async fn list_videos(State(state): State<AppState>) -> Json<Vec<VideoJob>> {
    Json(state.videos.list())
}

pub async fn get_video(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<VideoJob>> {
    state
        .videos
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("video job {id}")))
}

pub async fn cancel_video(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<VideoJob>> {
    state
        .videos
        .cancel(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("video job {id}")))
}

/// GET /api/v1/studio/videos/:id/download — proxies the finished file.
pub async fn download_video(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let uri = state
        .videos
        .video_uri(&id)
        .ok_or_else(|| ApiError::not_found(format!("finished video for job {id}")))?;

    let bytes = state.genai.backend().download_video(&uri).await.map_err(|e| {
        warn!(job_id = %id, error = %e, "Video download failed");
        ApiError::new(StatusCode::BAD_GATEWAY, "download_failed", e.to_string())
    })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .body(Body::from(bytes))
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string()))
}

// ─── Press release & quiz ──────────────────────────────────────────────────

pub async fn press_release(State(state): State<AppState>) -> Json<PressRelease> {
    Json(state.genai.generate_press_release().await)
}

pub async fn get_quiz(State(state): State<AppState>, Query(params): Query<QuizParams>) -> Json<Vec<QuizQuestion>> {
    let questions = quiz::default_questions();
    match params.lang.as_deref() {
        Some(lang) => Json(state.genai.translate_quiz(&questions, lang).await),
        None => Json(questions),
    }
}

/// Answer indices are language independent, so scoring always uses the
/// source questions.
pub async fn score_quiz(Json(req): Json<ScoreRequest>) -> ApiResult<Json<QuizResult>> {
    let questions = quiz::default_questions();
    if req.answers.len() > questions.len() {
        return Err(ApiError::bad_request(format!(
            "expected at most {} answers, got {}",
            questions.len(),
            req.answers.len()
        )));
    }
    let result = quiz::score(&questions, &req.answers);
    metrics::counter!("quiz.attempts", "passed" => if result.passed { "true" } else { "false" }).increment(1);
    Ok(Json(result))
}
