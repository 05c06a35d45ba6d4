//! Provider-facing seam. The service layer only talks to [`GenerativeBackend`].

use crate::error::GenAiError;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct TextRequest {
    pub prompt: String,
    /// When set, the provider is asked for JSON matching this schema.
    pub schema: Option<Value>,
}

impl TextRequest {
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            schema: Some(schema),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 image bytes as returned by the provider.
    pub base64_data: String,
}

impl GeneratedImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub prompt: String,
    pub aspect_ratio: String,
}

/// Status of a long-running video operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOperation {
    Running,
    Done { video_uri: String },
    Failed { code: Option<i64>, message: String },
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_text(&self, request: &TextRequest) -> Result<String, GenAiError>;

    async fn generate_image(&self, request: &ImageRequest) -> Result<GeneratedImage, GenAiError>;

    /// Submit a video generation; returns the operation name to poll.
    async fn start_video(&self, request: &VideoRequest) -> Result<String, GenAiError>;

    async fn poll_video(&self, operation: &str) -> Result<VideoOperation, GenAiError>;

    /// Fetch the bytes of a finished video.
    async fn download_video(&self, video_uri: &str) -> Result<Bytes, GenAiError>;
}
