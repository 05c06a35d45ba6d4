use thiserror::Error;

/// Failure talking to the generative provider.
#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Response did not match the expected shape: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl GenAiError {
    /// Whether the failure means the API key is missing, invalid or lacks
    /// access to the model, as opposed to a transient failure.
    pub fn is_credential_error(&self) -> bool {
        match self {
            GenAiError::MissingApiKey => true,
            GenAiError::Http { status, message } => {
                matches!(status, 401 | 403) || is_credential_message(message)
            }
            _ => false,
        }
    }
}

pub(crate) fn is_credential_message(message: &str) -> bool {
    message.contains("API key not valid")
        || message.contains("Requested entity was not found")
        || message.contains("PERMISSION_DENIED")
}

/// Terminal failure of a video generation run.
#[derive(Error, Debug)]
pub enum VideoGenerationError {
    /// The caller should prompt for a different credential.
    #[error("Invalid or unauthorized API key: {0}")]
    InvalidCredential(String),

    #[error("Video generation failed: {0}")]
    Failed(String),

    #[error("Video generation did not finish after {polls} status checks")]
    TimedOut { polls: u32 },

    #[error("Video generation was cancelled")]
    Cancelled,
}

impl From<GenAiError> for VideoGenerationError {
    fn from(e: GenAiError) -> Self {
        if e.is_credential_error() {
            VideoGenerationError::InvalidCredential(e.to_string())
        } else {
            VideoGenerationError::Failed(e.to_string())
        }
    }
}
