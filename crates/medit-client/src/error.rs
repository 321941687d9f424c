//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Job creation was rejected by the backend. Surfaced to the caller;
    /// there is no automatic retry for submissions.
    #[error("Submission rejected: backend returned {status}: {body}")]
    SubmissionRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A status check returned a non-success response.
    #[error("Status check failed: backend returned {status}")]
    StatusCheckFailed { status: reqwest::StatusCode },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Invalid backend URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Artifact error: {0}")]
    Artifact(#[from] medit_models::ArtifactError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Errors that only affect a single poll and never terminate a job.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::StatusCheckFailed { .. }
        )
    }
}
