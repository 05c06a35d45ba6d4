//! Long-running video ad generation: submit, then poll until the operation
//! finishes, the caller cancels, or the poll budget runs out.

use crate::backend::{VideoOperation, VideoRequest};
use crate::error::{is_credential_message, VideoGenerationError};
use crate::service::GenAiService;
use starlight_core::config::GenAiConfig;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shown to the user while a generation is in flight, one per poll.
pub const PROGRESS_MESSAGES: [&str; 5] = [
    "Warming up the camera...",
    "Setting the scene...",
    "Rendering frames...",
    "Adding the final touches...",
    "Almost there...",
];

pub const SUBMITTED_MESSAGE: &str = "Submitting your video request...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPollConfig {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for VideoPollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_polls: 60,
        }
    }
}

impl VideoPollConfig {
    pub fn from_config(config: &GenAiConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_secs.max(1)),
            max_polls: config.max_polls.max(1),
        }
    }
}

// google.rpc codes for PERMISSION_DENIED / UNAUTHENTICATED
const RPC_PERMISSION_DENIED: i64 = 7;
const RPC_UNAUTHENTICATED: i64 = 16;

fn operation_failure(code: Option<i64>, message: String) -> VideoGenerationError {
    let credential = matches!(code, Some(RPC_PERMISSION_DENIED | RPC_UNAUTHENTICATED | 401 | 403))
        || is_credential_message(&message);
    if credential {
        VideoGenerationError::InvalidCredential(message)
    } else {
        VideoGenerationError::Failed(message)
    }
}

impl GenAiService {
    /// Generate a video ad and return the provider's download URI.
    /// `progress` is called once on submit and once per poll.
    pub async fn generate_video_ad(
        &self,
        prompt: &str,
        progress: &(dyn Fn(&str) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<String, VideoGenerationError> {
        let poll = self.poll_config();
        metrics::counter!("genai.requests", "operation" => "generate_video_ad").increment(1);

        let request = VideoRequest {
            prompt: prompt.trim().to_string(),
            aspect_ratio: "16:9".to_string(),
        };
        progress(SUBMITTED_MESSAGE);

        let operation = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled()),
            started = self.backend().start_video(&request) => started.map_err(|e| {
                warn!(error = %e, "Video submission failed");
                metrics::counter!("genai.video.outcomes", "outcome" => "rejected").increment(1);
                VideoGenerationError::from(e)
            })?,
        };

        for attempt in 0..poll.max_polls {
            progress(PROGRESS_MESSAGES[attempt as usize % PROGRESS_MESSAGES.len()]);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled()),
                _ = tokio::time::sleep(poll.interval) => {}
            }

            match self.backend().poll_video(&operation).await? {
                VideoOperation::Running => {
                    debug!(operation = %operation, attempt, "Video still rendering");
                }
                VideoOperation::Done { video_uri } => {
                    metrics::counter!("genai.video.outcomes", "outcome" => "done").increment(1);
                    info!(operation = %operation, polls = attempt + 1, "Video generation finished");
                    return Ok(video_uri);
                }
                VideoOperation::Failed { code, message } => {
                    metrics::counter!("genai.video.outcomes", "outcome" => "failed").increment(1);
                    warn!(operation = %operation, ?code, %message, "Video generation failed");
                    return Err(operation_failure(code, message));
                }
            }
        }

        metrics::counter!("genai.video.outcomes", "outcome" => "timed_out").increment(1);
        warn!(operation = %operation, polls = poll.max_polls, "Video generation timed out");
        Err(VideoGenerationError::TimedOut { polls: poll.max_polls })
    }
}

fn cancelled() -> VideoGenerationError {
    metrics::counter!("genai.video.outcomes", "outcome" => "cancelled").increment(1);
    info!("Video generation cancelled");
    VideoGenerationError::Cancelled
}
