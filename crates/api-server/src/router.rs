//! Route table. Everything lives under /api/v1 except the probes.

use crate::state::AppState;
use crate::{ads_rest, feed_rest, library_rest, payments_rest, rest, studio_rest};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        // Feeds
        .route("/api/v1/feed/home", get(feed_rest::home))
        .route("/api/v1/feed/shorts", get(feed_rest::shorts))
        .route("/api/v1/search", get(feed_rest::search))
        .route("/api/v1/videos/comments", get(feed_rest::comments))
        // Library
        .route("/api/v1/uploads", get(library_rest::list_uploads).post(library_rest::create_upload))
        .route("/api/v1/uploads/:id", delete(library_rest::delete_upload))
        .route(
            "/api/v1/library/watch-later",
            get(library_rest::list_watch_later).post(library_rest::add_watch_later),
        )
        .route("/api/v1/library/watch-later/:id", delete(library_rest::remove_watch_later))
        .route(
            "/api/v1/library/playlists",
            get(library_rest::list_playlists).post(library_rest::create_playlist),
        )
        .route("/api/v1/library/playlists/:id", delete(library_rest::delete_playlist))
        .route("/api/v1/library/playlists/:id/videos", post(library_rest::add_to_playlist))
        .route(
            "/api/v1/library/playlists/:id/videos/:video_id",
            delete(library_rest::remove_from_playlist),
        )
        .route(
            "/api/v1/library/history",
            get(library_rest::list_history)
                .post(library_rest::record_watch)
                .delete(library_rest::clear_history),
        )
        .route("/api/v1/reports", get(library_rest::list_reports).post(library_rest::submit_report))
        .route("/api/v1/session/intro", get(library_rest::intro))
        // Ad console
        .route("/api/v1/ads/campaigns", get(ads_rest::list_campaigns).post(ads_rest::create_campaign))
        .route(
            "/api/v1/ads/campaigns/:id",
            get(ads_rest::get_campaign).delete(ads_rest::delete_campaign),
        )
        .route("/api/v1/ads/campaigns/:id/status", post(ads_rest::set_status))
        .route("/api/v1/ads/suggestions", post(ads_rest::save_suggestion))
        .route("/api/v1/ads/overview", get(ads_rest::overview))
        .route("/api/v1/ads/placements", get(ads_rest::list_placements).put(ads_rest::set_placement))
        .route("/api/v1/ads/slots/:slot", get(ads_rest::resolve_slot))
        // Studio
        .route("/api/v1/studio/ad-copy", post(studio_rest::ad_copy))
        .route("/api/v1/studio/thumbnail", post(studio_rest::thumbnail))
        .route("/api/v1/studio/campaign-suggestions", post(studio_rest::campaign_suggestions))
        .route("/api/v1/studio/videos", get(studio_rest::list_videos).post(studio_rest::start_video))
        .route(
            "/api/v1/studio/videos/:id",
            get(studio_rest::get_video).delete(studio_rest::cancel_video),
        )
        .route("/api/v1/studio/videos/:id/download", get(studio_rest::download_video))
        .route("/api/v1/press-release", get(studio_rest::press_release))
        .route("/api/v1/quiz", get(studio_rest::get_quiz))
        .route("/api/v1/quiz/score", post(studio_rest::score_quiz))
        // Payments
        .route("/api/v1/payments/transactions", get(payments_rest::list_transactions))
        .route("/api/v1/payments/transactions/:id/process", post(payments_rest::process))
        .route("/api/v1/payments/summary", get(payments_rest::summary))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use starlight_core::AppConfig;
    use starlight_genai::GeminiBackend;
    use starlight_core::{StarlightError, StarlightResult};
    use starlight_store::{KvStore, MemoryStore, Storage};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// App with in-memory storage and a backend without an API key, so every
    /// generative call takes its fallback path.
    fn app() -> Router {
        let config = AppConfig::default();
        let backend = Arc::new(GeminiBackend::from_config(&config.genai));
        build_router(AppState::new(&config, Storage::in_memory(), backend))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_probes() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(call(&app, Method::GET, "/ready", None).await.0, StatusCode::OK);
        assert_eq!(call(&app, Method::GET, "/live", None).await.0, StatusCode::OK);
    }

    /// Local store whose medium has gone away.
    struct Unreachable;

    impl KvStore for Unreachable {
        fn get(&self, _key: &str) -> StarlightResult<Option<String>> {
            Err(StarlightError::Storage("gone".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> StarlightResult<()> {
            Err(StarlightError::Storage("gone".into()))
        }
        fn remove(&self, _key: &str) -> StarlightResult<()> {
            Err(StarlightError::Storage("gone".into()))
        }
        fn ping(&self) -> StarlightResult<()> {
            Err(StarlightError::Storage("gone".into()))
        }
    }

    #[tokio::test]
    async fn test_ready_without_any_campaigns() {
        let app = app();
        let (_, campaigns) = call(&app, Method::GET, "/api/v1/ads/campaigns", None).await;
        for c in campaigns.as_array().unwrap() {
            let id = c["id"].as_str().unwrap();
            let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/ads/campaigns/{id}"), None).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
        }
        let (_, campaigns) = call(&app, Method::GET, "/api/v1/ads/campaigns", None).await;
        assert!(campaigns.as_array().unwrap().is_empty());

        assert_eq!(call(&app, Method::GET, "/ready", None).await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_when_storage_unreachable() {
        let config = AppConfig::default();
        let backend = Arc::new(GeminiBackend::from_config(&config.genai));
        let storage = Storage::new(Arc::new(Unreachable), Arc::new(MemoryStore::new()));
        let app = build_router(AppState::new(&config, storage, backend));

        assert_eq!(call(&app, Method::GET, "/ready", None).await.0, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(call(&app, Method::GET, "/live", None).await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_saved_suggestion_is_deletable() {
        let app = app();
        let suggestion = json!({
            "kind": "skippable", "id": "manual-7", "title": "Monsoon Deals",
            "status": "Paused", "spend": "$1,200", "ctr": "3.4%", "views": "54K"
        });
        let (status, saved) = call(&app, Method::POST, "/api/v1/ads/suggestions", Some(suggestion)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["id"], "manual-7");

        let (_, overview) = call(&app, Method::GET, "/api/v1/ads/overview", None).await;
        assert_eq!(overview["userCreated"], 1);

        let (status, _) = call(&app, Method::DELETE, "/api/v1/ads/campaigns/manual-7", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, "/api/v1/ads/campaigns/manual-7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let vendor_id = json!({
            "kind": "shorts", "id": "sh-01", "title": "Snack", "status": "Active", "impressions": "1K"
        });
        let (status, _) = call(&app, Method::POST, "/api/v1/ads/suggestions", Some(vendor_id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_falls_back_with_sponsored_ad() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/search?q=street%20food", None).await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["title"], "Search unavailable");
        assert_eq!(body["sponsored"]["status"], "Active");

        let (status, _) = call(&app, Method::GET, "/api/v1/search?q=%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_home_feed_with_uploads() {
        let app = app();
        for i in 0..5 {
            let (status, _) = call(
                &app,
                Method::POST,
                "/api/v1/uploads",
                Some(json!({ "title": format!("Clip {i}") })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = call(&app, Method::GET, "/api/v1/feed/home", None).await;
        assert_eq!(status, StatusCode::OK);
        // 5 uploads + fallback search video + poll + ad
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 8);
        assert_eq!(items[0]["item"]["title"], "Clip 4");
        assert_eq!(items[2]["type"], "poll");
        assert_eq!(items[5]["type"], "sponsored");
        assert!(body["sidebarAd"].is_object());
    }

    #[tokio::test]
    async fn test_campaign_lifecycle() {
        let app = app();
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/v1/ads/campaigns",
            Some(json!({ "title": "Summer", "kind": "unskippable", "country": "US" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["status"], "In Review");
        assert_eq!(created["duration"], "15s");

        let (status, updated) = call(
            &app,
            Method::POST,
            &format!("/api/v1/ads/campaigns/{id}/status"),
            Some(json!({ "status": "Active" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "Active");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/ads/placements",
            Some(json!({ "slot": "WATCH_SIDEBAR", "campaignId": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, slot) = call(&app, Method::GET, "/api/v1/ads/slots/WATCH_SIDEBAR", None).await;
        assert_eq!(slot["campaign"]["id"], id.as_str());

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/ads/campaigns/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/ads/campaigns/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::GET, "/api/v1/ads/slots/NOWHERE", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_playlist_routes() {
        let app = app();
        let (status, playlist) = call(
            &app,
            Method::POST,
            "/api/v1/library/playlists",
            Some(json!({ "name": "Favourites" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = playlist["id"].as_str().unwrap().to_string();

        let video = json!({ "id": "v1", "title": "One", "thumbnailUrl": "", "channelName": "c" });
        let (status, updated) = call(
            &app,
            Method::POST,
            &format!("/api/v1/library/playlists/{id}/videos"),
            Some(video),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["videos"].as_array().unwrap().len(), 1);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/library/playlists/pl-missing/videos",
            Some(json!({ "id": "v1", "title": "One", "thumbnailUrl": "", "channelName": "c" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_intro_shown_once() {
        let app = app();
        let (_, first) = call(&app, Method::GET, "/api/v1/session/intro", None).await;
        let (_, second) = call(&app, Method::GET, "/api/v1/session/intro", None).await;
        assert_eq!(first["showIntro"], true);
        assert_eq!(second["showIntro"], false);
    }

    #[tokio::test]
    async fn test_studio_fallbacks_and_video_credential_failure() {
        let app = app();
        let (status, copy) = call(
            &app,
            Method::POST,
            "/api/v1/studio/ad-copy",
            Some(json!({ "product": "shoes" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(copy["headline"], "Ad copy unavailable");

        let (status, job) = call(
            &app,
            Method::POST,
            "/api/v1/studio/videos",
            Some(json!({ "prompt": "launch teaser" })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let id = job["id"].as_str().unwrap().to_string();

        let mut state = Value::Null;
        for _ in 0..100 {
            let (_, job) = call(&app, Method::GET, &format!("/api/v1/studio/videos/{id}"), None).await;
            state = job["state"].clone();
            if state != "running" {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(state, "invalid_credential");

        let (status, _) = call(&app, Method::GET, &format!("/api/v1/studio/videos/{id}/download"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_quiz_and_payments() {
        let app = app();
        let (_, questions) = call(&app, Method::GET, "/api/v1/quiz", None).await;
        assert_eq!(questions.as_array().unwrap().len(), 5);

        let (status, result) = call(
            &app,
            Method::POST,
            "/api/v1/quiz/score",
            Some(json!({ "answers": [null, null] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["passed"], false);

        let (status, outcome) = call(
            &app,
            Method::POST,
            "/api/v1/payments/transactions/txn-1002/process",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["outcome"], "processed");
        assert_eq!(outcome["transaction"]["status"], "Completed");

        let (status, _) = call(&app, Method::POST, "/api/v1/payments/transactions/nope/process", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
