//! Client for the external generative service: schema-constrained text,
//! image generation and long-running video generation.

#![warn(clippy::unwrap_used)]

pub mod backend;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod jobs;
pub mod schema;
pub mod service;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{GeneratedImage, GenerativeBackend, VideoOperation};
pub use error::{GenAiError, VideoGenerationError};
pub use gemini::GeminiBackend;
pub use jobs::{VideoJob, VideoJobState, VideoJobs};
pub use service::{AdCopy, GenAiService};
pub use video::VideoPollConfig;
