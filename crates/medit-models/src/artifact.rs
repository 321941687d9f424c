//! Artifact reference resolution.
//!
//! The backend returns artifact locations as path fragments
//! (`/storage/processed/<id>.mp4`). They only become fetchable once
//! resolved against the backend origin.

use thiserror::Error;
use url::Url;

pub type ArtifactResult<T> = Result<T, ArtifactError>;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Invalid artifact reference '{fragment}': {source}")]
    InvalidReference {
        fragment: String,
        #[source]
        source: url::ParseError,
    },
}

/// Resolve a backend-relative artifact fragment into a fetchable URL.
pub fn resolve_artifact_url(base: &Url, fragment: &str) -> ArtifactResult<Url> {
    base.join(fragment)
        .map_err(|source| ArtifactError::InvalidReference {
            fragment: fragment.to_string(),
            source,
        })
}
