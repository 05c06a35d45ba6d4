//! Generative operations used by the app. Every text and image operation
//! degrades to a deterministic fallback on failure; only video generation
//! surfaces a typed error (see [`crate::video`]).

use crate::backend::{GenerativeBackend, ImageRequest, TextRequest};
use crate::error::GenAiError;
use crate::fallback;
use crate::schema;
use crate::video::VideoPollConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use starlight_core::campaign::MANUAL_ID_PREFIX;
use starlight_core::config::GenAiConfig;
use starlight_core::quiz::QuizQuestion;
use starlight_core::types::{Comment, PressRelease};
use starlight_core::{Campaign, CampaignFormat, CampaignStatus, Targeting, Video};
use starlight_store::namespace::{self, Key, PRESS_RELEASE};
use starlight_store::Storage;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    pub headline: String,
    pub body: String,
    pub call_to_action: String,
}

/// Video shape as the model returns it; display fields may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedVideo {
    id: String,
    title: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    channel_name: String,
    #[serde(default)]
    channel_avatar_url: Option<String>,
    #[serde(default)]
    views: String,
    #[serde(default)]
    upload_time: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Option<String>,
}

impl From<GeneratedVideo> for Video {
    fn from(g: GeneratedVideo) -> Self {
        let seed = namespace::normalize(&g.id);
        Video {
            thumbnail_url: g
                .thumbnail_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("https://picsum.photos/seed/{seed}/640/360")),
            channel_avatar_url: g
                .channel_avatar_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("https://i.pravatar.cc/48?u={seed}")),
            id: g.id,
            title: g.title,
            channel_name: g.channel_name,
            community_name: None,
            community_avatar_url: None,
            views: g.views,
            upload_time: g.upload_time,
            upload_date: None,
            duration: g.duration,
            description: g.description,
            category: g.category,
            subcategory: None,
            country: None,
            state: None,
            city: None,
            is_short: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestedCampaign {
    title: String,
    status: CampaignStatus,
    spend: String,
    ctr: String,
    views: String,
}

#[derive(Clone)]
pub struct GenAiService {
    backend: Arc<dyn GenerativeBackend>,
    storage: Storage,
    poll: VideoPollConfig,
}

impl GenAiService {
    pub fn new(backend: Arc<dyn GenerativeBackend>, storage: Storage, poll: VideoPollConfig) -> Self {
        Self { backend, storage, poll }
    }

    pub fn from_config(backend: Arc<dyn GenerativeBackend>, storage: Storage, config: &GenAiConfig) -> Self {
        Self::new(backend, storage, VideoPollConfig::from_config(config))
    }

    pub fn backend(&self) -> &Arc<dyn GenerativeBackend> {
        &self.backend
    }

    pub fn poll_config(&self) -> VideoPollConfig {
        self.poll
    }

    // ─── Plumbing ──────────────────────────────────────────────────────────

    async fn generate_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T, GenAiError> {
        metrics::counter!("genai.requests", "operation" => operation).increment(1);
        let text = self.backend.generate_text(&TextRequest::json(prompt, schema)).await?;
        parse_json(&text)
    }

    fn cached<T: DeserializeOwned>(&self, key: &Key<T>) -> Option<T> {
        match self.storage.read(key) {
            Ok(Some(value)) => {
                metrics::counter!("genai.cache_hits").increment(1);
                debug!(key = key.name(), "Generative cache hit");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = key.name(), error = %e, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    fn store<T: Serialize>(&self, key: &Key<T>, value: &T) {
        if let Err(e) = self.storage.write(key, value) {
            warn!(key = key.name(), error = %e, "Failed to cache generated content");
        }
    }

    // ─── Operations ────────────────────────────────────────────────────────

    pub async fn search_videos(&self, query: &str) -> Vec<Video> {
        let key = namespace::search_cache(query);
        if let Some(videos) = self.cached(&key) {
            return videos;
        }

        let prompt = format!(
            "Generate 12 realistic video search results for the query \"{}\" on a video-sharing \
             platform. Use unique ids, plausible channel names, view counts like \"1.2M views\", \
             upload times like \"3 days ago\" and durations like \"12:34\".",
            query.trim()
        );
        let result = self
            .generate_json::<Vec<GeneratedVideo>>("search_videos", prompt, schema::videos())
            .await
            .and_then(|videos| non_empty(videos, "search results"));

        match result {
            Ok(generated) => {
                let videos: Vec<Video> = generated.into_iter().map(Video::from).collect();
                self.store(&key, &videos);
                videos
            }
            Err(e) => {
                record_fallback("search_videos", &e);
                fallback::search_results(query)
            }
        }
    }

    pub async fn generate_comments(&self, title: &str) -> Vec<Comment> {
        let key = namespace::comments_cache(title);
        if let Some(comments) = self.cached(&key) {
            return comments;
        }

        let prompt = format!(
            "Write 8 short, varied viewer comments for a video titled \"{}\". Give each an \
             author handle, a like count such as \"1.4K\" and a relative timestamp such as \
             \"2 hours ago\".",
            title.trim()
        );
        let result = self
            .generate_json::<Vec<Comment>>("generate_comments", prompt, schema::comments())
            .await
            .and_then(|comments| non_empty(comments, "comments"));

        match result {
            Ok(comments) => {
                self.store(&key, &comments);
                comments
            }
            Err(e) => {
                record_fallback("generate_comments", &e);
                fallback::comments()
            }
        }
    }

    pub async fn generate_ad_copy(&self, product: &str, audience: &str) -> AdCopy {
        let prompt = format!(
            "Write a video ad for \"{}\" aimed at {}. Return a headline under 60 characters, a \
             body of at most two sentences and a short call to action.",
            product.trim(),
            audience.trim()
        );
        let result = self
            .generate_json::<AdCopy>("generate_ad_copy", prompt, schema::ad_copy())
            .await
            .and_then(|copy| {
                if copy.headline.trim().is_empty() {
                    Err(GenAiError::InvalidResponse("empty headline".to_string()))
                } else {
                    Ok(copy)
                }
            });

        result.unwrap_or_else(|e| {
            record_fallback("generate_ad_copy", &e);
            fallback::ad_copy()
        })
    }

    /// Suggested skippable campaigns. Suggestions get `manual-` ids so that
    /// saving one lands it in the user bucket.
    pub async fn suggest_campaigns(&self, brief: &str) -> Vec<Campaign> {
        let prompt = format!(
            "Suggest 4 skippable video ad campaigns for this brief: \"{}\". Give each a title, \
             a status, a spend such as \"$1,200\", a click-through rate such as \"3.4%\" and a \
             view count such as \"54K\".",
            brief.trim()
        );
        let result = self
            .generate_json::<Vec<SuggestedCampaign>>("suggest_campaigns", prompt, schema::campaign_suggestions())
            .await
            .and_then(|s| non_empty(s, "campaign suggestions"));

        match result {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| Campaign {
                    id: format!("{MANUAL_ID_PREFIX}{}", Uuid::new_v4()),
                    title: s.title,
                    status: s.status,
                    spend: s.spend,
                    thumbnail_url: String::new(),
                    targeting: Targeting::default(),
                    format: CampaignFormat::Skippable { ctr: s.ctr, views: s.views },
                })
                .collect(),
            Err(e) => {
                record_fallback("suggest_campaigns", &e);
                fallback::campaign_suggestions()
            }
        }
    }

    pub async fn generate_press_release(&self) -> PressRelease {
        if let Some(release) = self.cached(&PRESS_RELEASE) {
            return release;
        }

        let prompt = "Write a launch press release for StarLight, a video platform for creators \
                      and communities with built-in ad tools. Return a headline and a body of \
                      three short paragraphs."
            .to_string();
        match self
            .generate_json::<PressRelease>("generate_press_release", prompt, schema::press_release())
            .await
        {
            Ok(release) if !release.headline.trim().is_empty() => {
                self.store(&PRESS_RELEASE, &release);
                release
            }
            Ok(_) => {
                record_fallback(
                    "generate_press_release",
                    &GenAiError::InvalidResponse("empty headline".to_string()),
                );
                fallback::press_release()
            }
            Err(e) => {
                record_fallback("generate_press_release", &e);
                fallback::press_release()
            }
        }
    }

    /// Translate quiz text. Ids, option counts and answer indices are kept
    /// from the input; a translation that changes them is rejected.
    pub async fn translate_quiz(&self, questions: &[QuizQuestion], language: &str) -> Vec<QuizQuestion> {
        let language = language.trim();
        if language.is_empty() || language.eq_ignore_ascii_case("en") || language.eq_ignore_ascii_case("english") {
            return questions.to_vec();
        }

        let key = namespace::quiz_cache(language);
        if let Some(cached) = self.cached(&key) {
            if aligned(questions, &cached) {
                return cached;
            }
        }

        let source = match serde_json::to_string(questions) {
            Ok(s) => s,
            Err(e) => {
                record_fallback("translate_quiz", &GenAiError::Json(e));
                return questions.to_vec();
            }
        };
        let prompt = format!(
            "Translate the text of these quiz questions into {language}. Keep every id, the \
             number and order of options, and correctIndex unchanged.\n{source}"
        );
        let result = self
            .generate_json::<Vec<QuizQuestion>>("translate_quiz", prompt, schema::quiz())
            .await
            .and_then(|translated| {
                if aligned(questions, &translated) {
                    Ok(translated)
                } else {
                    Err(GenAiError::InvalidResponse("translation changed quiz structure".to_string()))
                }
            });

        match result {
            Ok(translated) => {
                self.store(&key, &translated);
                translated
            }
            Err(e) => {
                record_fallback("translate_quiz", &e);
                questions.to_vec()
            }
        }
    }

    /// Returns a `data:` URL, or a placeholder image URL on failure.
    pub async fn generate_thumbnail(&self, prompt: &str) -> String {
        metrics::counter!("genai.requests", "operation" => "generate_thumbnail").increment(1);
        let request = ImageRequest {
            prompt: format!("Eye-catching video thumbnail, no text overlay: {}", prompt.trim()),
            aspect_ratio: "16:9".to_string(),
        };
        match self.backend.generate_image(&request).await {
            Ok(image) => image.data_url(),
            Err(e) => {
                record_fallback("generate_thumbnail", &e);
                fallback::PLACEHOLDER_THUMBNAIL.to_string()
            }
        }
    }
}

fn record_fallback(operation: &'static str, error: &GenAiError) {
    metrics::counter!("genai.fallbacks", "operation" => operation).increment(1);
    warn!(operation, error = %error, "Generative call failed, using fallback");
}

fn non_empty<T>(items: Vec<T>, what: &str) -> Result<Vec<T>, GenAiError> {
    if items.is_empty() {
        Err(GenAiError::InvalidResponse(format!("no {what} returned")))
    } else {
        Ok(items)
    }
}

fn aligned(original: &[QuizQuestion], translated: &[QuizQuestion]) -> bool {
    original.len() == translated.len()
        && original.iter().zip(translated).all(|(a, b)| {
            a.id == b.id && a.options.len() == b.options.len() && a.correct_index == b.correct_index
        })
}

/// Parse model output as JSON, tolerating a surrounding markdown fence.
pub(crate) fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GenAiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim()).map_err(|e| GenAiError::InvalidResponse(e.to_string()))
}
