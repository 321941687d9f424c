//! HTTP client tests against a mock backend.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medit_client::{BackendConfig, ClientError, JobClient};
use medit_models::{JobId, JobStatus, Style};

fn client_for(server: &MockServer) -> JobClient {
    JobClient::new(BackendConfig::default().with_base_url(server.uri()))
        .expect("client construction")
}

#[tokio::test]
async fn submit_returns_backend_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(query_param("style", "cinematic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "queued",
            "message": "Job created",
            "original_video": "/storage/uploads/abc123_clip.mp4",
            "processed_video": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .submit("clip.mp4", b"fake video bytes".to_vec(), Style::Cinematic)
        .await
        .expect("submission");

    assert!(!record.job_id.is_empty());
    assert_eq!(record.job_id.as_str(), "abc123");
    assert_eq!(record.status, JobStatus::Queued);
    assert!(!record.is_terminal());
    assert_eq!(
        record.original_video.as_deref(),
        Some("/storage/uploads/abc123_clip.mp4")
    );

    // The upload must ride as a multipart body carrying the raw file.
    let requests = server.received_requests().await.expect("recording enabled");
    let post = requests
        .iter()
        .find(|r| r.method.to_string() == "POST")
        .expect("one POST");
    assert!(post
        .body
        .windows(b"fake video bytes".len())
        .any(|w| w == b"fake video bytes"));
}

#[tokio::test]
async fn submit_rejection_surfaces_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .submit("clip.mp4", b"bytes".to_vec(), Style::Anime)
        .await
        .expect_err("must fail");

    match err {
        ClientError::SubmissionRejected { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_status_scrubs_stray_artifact() {
    let server = MockServer::start().await;

    // A buggy backend pairing an artifact with a non-completed status.
    Mock::given(method("GET"))
        .and(path("/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "processing_frames",
            "processed_video": "/storage/processed/abc123.mp4"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .fetch_status(&JobId::from_string("abc123"))
        .await
        .expect("status fetch");

    assert_eq!(record.status, JobStatus::ProcessingFrames);
    assert!(record.processed_video.is_none());
}

#[tokio::test]
async fn health_check_reports_backend_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.health_check().await.expect("health check"));
}

#[tokio::test]
async fn health_check_never_raises_on_transport_failure() {
    // Nothing listens here; the check reports unhealthy instead of erroring.
    let client = JobClient::new(BackendConfig::default().with_base_url("http://127.0.0.1:9"))
        .expect("client construction");

    assert!(!client.health_check().await.expect("health check"));
}

#[tokio::test]
async fn download_artifact_writes_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage/processed/abc123.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"processed-bytes".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("result.mp4");

    client
        .download_artifact("/storage/processed/abc123.mp4", &dest)
        .await
        .expect("download");

    let contents = tokio::fs::read(&dest).await.expect("read result");
    assert_eq!(contents, b"processed-bytes");
}

#[tokio::test]
async fn resolve_artifact_joins_against_origin() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let url = client
        .resolve_artifact("/storage/processed/abc123.mp4")
        .expect("resolution");

    assert_eq!(
        url.as_str(),
        format!("{}/storage/processed/abc123.mp4", server.uri())
    );
}
