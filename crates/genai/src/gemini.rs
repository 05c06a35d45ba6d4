//! Gemini REST backend (generateContent / predict / predictLongRunning).

use crate::backend::{GeneratedImage, GenerativeBackend, ImageRequest, TextRequest, VideoOperation, VideoRequest};
use crate::error::GenAiError;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use starlight_core::config::GenAiConfig;
use tracing::{debug, info};
use url::Url;

// ─── Wire types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    name: Option<String>,
    #[serde(default)]
    done: bool,
    error: Option<OperationError>,
    response: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ─── Client ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    text_model: String,
    image_model: String,
    video_model: String,
}

impl GeminiBackend {
    pub fn from_config(config: &GenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            video_model: config.video_model.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, GenAiError> {
        self.api_key.as_deref().ok_or(GenAiError::MissingApiKey)
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(&self, url: &str, body: &Value) -> Result<T, GenAiError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key()?)
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }
}

pub fn authorized_uri(video_uri: &str, api_key: &str) -> Result<Url, GenAiError> {
    let mut url = Url::parse(video_uri)?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

async fn parse_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, GenAiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(GenAiError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Pull the first video URI out of a finished operation's response.
fn extract_video_uri(response: &Value) -> Option<String> {
    response
        .pointer("/generateVideoResponse/generatedSamples/0/video/uri")
        .or_else(|| response.pointer("/generatedVideos/0/video/uri"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate_text(&self, request: &TextRequest) -> Result<String, GenAiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: request.schema.clone().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        };
        let url = self.model_url(&self.text_model, "generateContent");
        let response: GenerateContentResponse = self.post_json(&url, &serde_json::to_value(&body)?).await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GenAiError::EmptyResponse);
        }
        debug!(model = %self.text_model, chars = text.len(), "Text generated");
        Ok(text)
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<GeneratedImage, GenAiError> {
        let body = json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": { "sampleCount": 1, "aspectRatio": request.aspect_ratio },
        });
        let url = self.model_url(&self.image_model, "predict");
        let response: PredictResponse = self.post_json(&url, &body).await?;
        let prediction = response.predictions.into_iter().next().ok_or(GenAiError::EmptyResponse)?;
        let base64_data = prediction.bytes_base64_encoded.ok_or(GenAiError::EmptyResponse)?;
        Ok(GeneratedImage {
            mime_type: prediction.mime_type.unwrap_or_else(|| "image/png".to_string()),
            base64_data,
        })
    }

    async fn start_video(&self, request: &VideoRequest) -> Result<String, GenAiError> {
        let body = json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": { "aspectRatio": request.aspect_ratio },
        });
        let url = self.model_url(&self.video_model, "predictLongRunning");
        let op: OperationResponse = self.post_json(&url, &body).await?;
        let name = op
            .name
            .ok_or_else(|| GenAiError::InvalidResponse("operation has no name".to_string()))?;
        info!(model = %self.video_model, operation = %name, "Video generation submitted");
        Ok(name)
    }

    async fn poll_video(&self, operation: &str) -> Result<VideoOperation, GenAiError> {
        let url = format!("{}/{}", self.base_url, operation.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", self.api_key()?)
            .send()
            .await?;
        let op: OperationResponse = parse_response(response).await?;

        if let Some(err) = op.error {
            return Ok(VideoOperation::Failed {
                code: err.code,
                message: err.message,
            });
        }
        if !op.done {
            return Ok(VideoOperation::Running);
        }
        let uri = op
            .response
            .as_ref()
            .and_then(extract_video_uri)
            .ok_or_else(|| GenAiError::InvalidResponse("finished operation has no video".to_string()))?;
        Ok(VideoOperation::Done { video_uri: uri })
    }

    /// Provider file URIs need the API key appended as a query parameter.
    async fn download_video(&self, video_uri: &str) -> Result<Bytes, GenAiError> {
        let url = authorized_uri(video_uri, self.api_key()?)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenAiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.bytes().await?)
    }
}
