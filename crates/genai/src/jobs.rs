//! In-process registry of background video generations, so HTTP callers can
//! start a run, check on it, and cancel it.

use crate::error::VideoGenerationError;
use crate::service::GenAiService;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use starlight_core::config::GenAiConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VideoJobState {
    Running { message: String },
    Succeeded { video_uri: String },
    /// The caller should ask the user for a different API key.
    InvalidCredential { error: String },
    Failed { error: String },
    TimedOut { polls: u32 },
    Cancelled,
}

impl VideoJobState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, VideoJobState::Running { .. })
    }
}

impl From<VideoGenerationError> for VideoJobState {
    fn from(e: VideoGenerationError) -> Self {
        match e {
            VideoGenerationError::InvalidCredential(_) => VideoJobState::InvalidCredential { error: e.to_string() },
            VideoGenerationError::Failed(_) => VideoJobState::Failed { error: e.to_string() },
            VideoGenerationError::TimedOut { polls } => VideoJobState::TimedOut { polls },
            VideoGenerationError::Cancelled => VideoJobState::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    pub id: String,
    pub prompt: String,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: VideoJobState,
}

struct JobEntry {
    job: VideoJob,
    cancel: CancellationToken,
    finished_at: Option<Instant>,
}

/// Finished jobs stay queryable for `ttl`, then get evicted on the next
/// `start` or `list`. Running jobs are never evicted.
#[derive(Clone)]
pub struct VideoJobs {
    service: GenAiService,
    jobs: Arc<DashMap<String, JobEntry>>,
    ttl: Duration,
}

impl VideoJobs {
    pub fn new(service: GenAiService, ttl: Duration) -> Self {
        Self {
            service,
            jobs: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn from_config(service: GenAiService, config: &GenAiConfig) -> Self {
        Self::new(service, Duration::from_secs(config.video_job_ttl_secs))
    }

    /// Drop finished jobs older than the TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let before = self.jobs.len();
        self.jobs
            .retain(|_, entry| entry.finished_at.map_or(true, |at| at.elapsed() <= self.ttl));
        let evicted = before.saturating_sub(self.jobs.len());
        if evicted > 0 {
            debug!(evicted, "Evicted finished video jobs");
            metrics::gauge!("genai.video.jobs").set(self.jobs.len() as f64);
        }
        evicted
    }

    /// Spawn a generation on the runtime and return its initial snapshot.
    pub fn start(&self, prompt: String) -> VideoJob {
        self.evict_expired();
        let id = format!("vid-{}", Uuid::new_v4());
        let now = Utc::now();
        let cancel = CancellationToken::new();
        let job = VideoJob {
            id: id.clone(),
            prompt: prompt.clone(),
            started_at: now,
            updated_at: now,
            state: VideoJobState::Running {
                message: crate::video::SUBMITTED_MESSAGE.to_string(),
            },
        };
        self.jobs.insert(
            id.clone(),
            JobEntry {
                job: job.clone(),
                cancel: cancel.clone(),
                finished_at: None,
            },
        );
        metrics::gauge!("genai.video.jobs").set(self.jobs.len() as f64);
        info!(job_id = %id, "Video job started");

        let service = self.service.clone();
        let jobs = self.jobs.clone();
        tokio::spawn(async move {
            let progress_jobs = jobs.clone();
            let progress_id = id.clone();
            let progress = move |message: &str| {
                if let Some(mut entry) = progress_jobs.get_mut(&progress_id) {
                    if !entry.job.state.is_finished() {
                        entry.job.state = VideoJobState::Running {
                            message: message.to_string(),
                        };
                        entry.job.updated_at = Utc::now();
                    }
                }
            };

            let outcome = service.generate_video_ad(&prompt, &progress, &cancel).await;
            if let Some(mut entry) = jobs.get_mut(&id) {
                entry.job.state = match outcome {
                    Ok(video_uri) => VideoJobState::Succeeded { video_uri },
                    Err(e) => e.into(),
                };
                entry.job.updated_at = Utc::now();
                entry.finished_at = Some(Instant::now());
            }
        });

        job
    }

    pub fn get(&self, id: &str) -> Option<VideoJob> {
        self.jobs.get(id).map(|e| e.job.clone())
    }

    pub fn list(&self) -> Vec<VideoJob> {
        self.evict_expired();
        let mut jobs: Vec<VideoJob> = self.jobs.iter().map(|e| e.job.clone()).collect();
        jobs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        jobs
    }

    /// Request cancellation. Returns `None` for an unknown id; the returned
    /// snapshot may still read Running until the task observes the token.
    pub fn cancel(&self, id: &str) -> Option<VideoJob> {
        let entry = self.jobs.get(id)?;
        entry.cancel.cancel();
        info!(job_id = id, "Video job cancellation requested");
        Some(entry.job.clone())
    }

    /// URI of a finished job's video, if it succeeded.
    pub fn video_uri(&self, id: &str) -> Option<String> {
        match self.get(id)?.state {
            VideoJobState::Succeeded { video_uri } => Some(video_uri),
            _ => None,
        }
    }
}
