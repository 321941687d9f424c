//! HTTP client for the processing backend.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use medit_models::{resolve_artifact_url, JobId, JobRecord, Style};

use crate::config::BackendConfig;
use crate::error::{ClientError, ClientResult};

/// Health check response body.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Client for the video processing backend.
///
/// Owns the HTTP connection pool and the resolved backend origin. All
/// methods are request/response only; the polling loop lives in
/// [`crate::poller`] and the current-job state in [`crate::tracker`].
pub struct JobClient {
    http: Client,
    base_url: Url,
    config: BackendConfig,
}

impl JobClient {
    /// Create a new client.
    pub fn new(config: BackendConfig) -> ClientResult<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(BackendConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The resolved backend origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    /// Check if the backend is reachable and healthy.
    pub async fn health_check(&self) -> ClientResult<bool> {
        let url = self.endpoint("/health")?;

        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response.json().await?;
                Ok(health.status == "ok" || health.status == "healthy")
            }
            Ok(response) => {
                warn!("Backend health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Backend health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Submit a new processing job.
    ///
    /// The video rides as a multipart body under the `file` field; the
    /// style preset goes as a query parameter, which is what the backend
    /// expects. Returns the backend's job record with whatever initial
    /// status it assigned.
    pub async fn submit(
        &self,
        file_name: impl Into<String>,
        video: Vec<u8>,
        style: Style,
    ) -> ClientResult<JobRecord> {
        let file_name = file_name.into();
        let mut url = self.endpoint("/jobs")?;
        url.query_pairs_mut().append_pair("style", style.as_str());

        debug!(%url, file_name = %file_name, size = video.len(), "Submitting job");

        let part = Part::bytes(video)
            .mime_str(mime_for(&file_name))?
            .file_name(file_name);
        let form = Form::new().part("file", part);

        let response = self.http.post(url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::SubmissionRejected { status, body });
        }

        let mut record: JobRecord = response.json().await?;
        record.scrub_artifacts();

        debug!(job_id = %record.job_id, status = %record.status, "Job accepted");
        Ok(record)
    }

    /// Submit a video file from disk.
    pub async fn submit_file(
        &self,
        path: impl AsRef<Path>,
        style: Style,
    ) -> ClientResult<JobRecord> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.mp4".to_string());
        let video = tokio::fs::read(path).await?;

        self.submit(file_name, video, style).await
    }

    /// Fetch the current status of a job.
    ///
    /// Responses are scrubbed on arrival so a processed artifact is only
    /// ever visible on a completed record.
    pub async fn fetch_status(&self, job_id: &JobId) -> ClientResult<JobRecord> {
        let url = self.endpoint(&format!("/jobs/{}", job_id))?;

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::StatusCheckFailed {
                status: response.status(),
            });
        }

        let mut record: JobRecord = response.json().await?;
        record.scrub_artifacts();
        Ok(record)
    }

    /// Resolve a backend-relative artifact fragment into a fetchable URL.
    pub fn resolve_artifact(&self, fragment: &str) -> ClientResult<Url> {
        Ok(resolve_artifact_url(&self.base_url, fragment)?)
    }

    /// Download an artifact to a local file.
    pub async fn download_artifact(
        &self,
        fragment: &str,
        dest: impl AsRef<Path>,
    ) -> ClientResult<()> {
        let url = self.resolve_artifact(fragment)?;
        let dest = dest.as_ref();

        debug!(%url, dest = %dest.display(), "Downloading artifact");

        let mut response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::DownloadFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            written += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        debug!(dest = %dest.display(), bytes = written, "Artifact downloaded");
        Ok(())
    }
}

/// Best-effort MIME type from the upload's file extension.
fn mime_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for("clip.mp4"), "video/mp4");
        assert_eq!(mime_for("clip.MOV"), "video/quicktime");
        assert_eq!(mime_for("clip.webm"), "video/webm");
        assert_eq!(mime_for("noextension"), "video/mp4");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = BackendConfig::default().with_base_url("not a url");
        assert!(matches!(
            JobClient::new(config),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }
}
