//! Scripted backend for unit tests.

use crate::backend::{GeneratedImage, GenerativeBackend, ImageRequest, TextRequest, VideoOperation, VideoRequest};
use crate::error::GenAiError;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum StartScript {
    Operation(String),
    Unauthorized,
    ServerError,
}

pub struct ScriptedBackend {
    text: Option<String>,
    image: Option<GeneratedImage>,
    start: StartScript,
    polls: Mutex<VecDeque<VideoOperation>>,
    text_calls: AtomicUsize,
    poll_calls: AtomicUsize,
}

impl ScriptedBackend {
    fn base() -> Self {
        Self {
            text: None,
            image: None,
            start: StartScript::Operation("operations/test-op".to_string()),
            polls: Mutex::new(VecDeque::new()),
            text_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_text() -> Self {
        Self::base()
    }

    pub fn with_text(body: &str) -> Self {
        Self {
            text: Some(body.to_string()),
            ..Self::base()
        }
    }

    pub fn with_image(mime_type: &str, base64_data: &str) -> Self {
        Self {
            image: Some(GeneratedImage {
                mime_type: mime_type.to_string(),
                base64_data: base64_data.to_string(),
            }),
            ..Self::base()
        }
    }

    /// Video run that reports the given states in order, then `Running` forever.
    pub fn with_video(start: StartScript, polls: Vec<VideoOperation>) -> Self {
        Self {
            start,
            polls: Mutex::new(polls.into()),
            ..Self::base()
        }
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }
}

fn server_error() -> GenAiError {
    GenAiError::Http {
        status: 500,
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_text(&self, _request: &TextRequest) -> Result<String, GenAiError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or_else(server_error)
    }

    async fn generate_image(&self, _request: &ImageRequest) -> Result<GeneratedImage, GenAiError> {
        self.image.clone().ok_or_else(server_error)
    }

    async fn start_video(&self, _request: &VideoRequest) -> Result<String, GenAiError> {
        match &self.start {
            StartScript::Operation(name) => Ok(name.clone()),
            StartScript::Unauthorized => Err(GenAiError::Http {
                status: 400,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            }),
            StartScript::ServerError => Err(server_error()),
        }
    }

    async fn poll_video(&self, _operation: &str) -> Result<VideoOperation, GenAiError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.polls.lock().unwrap().pop_front();
        Ok(next.unwrap_or(VideoOperation::Running))
    }

    async fn download_video(&self, video_uri: &str) -> Result<Bytes, GenAiError> {
        Ok(Bytes::from(format!("video:{video_uri}")))
    }
}
