//! Home, shorts and search pages, plus generated comments.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use starlight_core::types::Comment;
use starlight_feed::{HomePage, SearchPage, ShortsFeed};

/// Topic used to fill the home feed after the viewer's own uploads.
const HOME_TOPIC: &str = "trending videos";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentParams {
    #[serde(default)]
    pub title: String,
}

/// GET /api/v1/feed/home
pub async fn home(State(state): State<AppState>) -> Json<HomePage> {
    let discovered = state.genai.search_videos(HOME_TOPIC).await;
    Json(state.feeds.home(discovered))
}

/// GET /api/v1/feed/shorts
pub async fn shorts(State(state): State<AppState>) -> Json<ShortsFeed> {
    Json(state.feeds.shorts(Vec::new()))
}

/// GET /api/v1/search?q=
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Json<SearchPage>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::bad_request("query parameter 'q' is required"));
    }
    let results = state.genai.search_videos(&params.q).await;
    metrics::counter!("api.searches").increment(1);
    Ok(Json(state.feeds.search(&params.q, results)))
}

/// GET /api/v1/videos/comments?title=
pub async fn comments(
    State(state): State<AppState>,
    Query(params): Query<CommentParams>,
) -> ApiResult<Json<Vec<Comment>>> {
    if params.title.trim().is_empty() {
        return Err(ApiError::bad_request("query parameter 'title' is required"));
    }
    Ok(Json(state.genai.generate_comments(&params.title).await))
}
