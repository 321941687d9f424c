//! Job identity, status, and the record tracked through a job's lifetime.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a processing job.
///
/// Assigned by the backend at submission time and never changes afterward.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is an unassigned (pre-submission) identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing status reported by the backend.
///
/// `Idle` is client-local: it marks a record created before submission and
/// is never returned by the backend. The remaining statuses generally
/// progress in the order listed, but the backend is authoritative and the
/// client never assumes monotonicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No submission has reached the backend yet (client-local)
    #[default]
    Idle,
    /// Job is waiting for a worker
    Queued,
    /// Frames are being extracted from the source video
    ProcessingFrames,
    /// Pose estimation is running on the extracted frames
    EstimatingPose,
    /// The output video is being generated
    GeneratingVideo,
    /// Job completed successfully
    Completed,
    /// Job failed with an error
    Failed,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Idle => "idle",
            JobStatus::Queued => "queued",
            JobStatus::ProcessingFrames => "processing_frames",
            JobStatus::EstimatingPose => "estimating_pose",
            JobStatus::GeneratingVideo => "generating_video",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Human-readable label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Idle => "Waiting",
            JobStatus::Queued => "Queued",
            JobStatus::ProcessingFrames => "Extracting frames",
            JobStatus::EstimatingPose => "Analyzing motion",
            JobStatus::GeneratingVideo => "Generating video",
            JobStatus::Completed => "Done",
            JobStatus::Failed => "Failed",
        }
    }

    /// Coarse progress percentage for progress displays.
    pub fn progress_percent(&self) -> u8 {
        match self {
            JobStatus::Queued => 10,
            JobStatus::ProcessingFrames => 30,
            JobStatus::EstimatingPose => 60,
            JobStatus::GeneratingVideo => 80,
            JobStatus::Completed => 100,
            JobStatus::Idle | JobStatus::Failed => 0,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A processing job as tracked by the client.
///
/// Created locally as an idle placeholder, replaced by the backend's
/// response at submission time, then replaced on every successful poll
/// until a terminal status is observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JobRecord {
    /// Unique job identifier, backend-assigned
    pub job_id: JobId,

    /// Current processing status
    #[serde(default)]
    pub status: JobStatus,

    /// Human-readable detail, typically present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Backend-relative reference to the uploaded source video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_video: Option<String>,

    /// Backend-relative reference to the output video, present only once
    /// the job has completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_video: Option<String>,
}

impl JobRecord {
    /// Local placeholder for a submission that has not reached the backend.
    pub fn idle() -> Self {
        Self {
            job_id: JobId::from_string(""),
            status: JobStatus::Idle,
            message: None,
            original_video: None,
            processed_video: None,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Drop the processed artifact unless the job actually finished.
    ///
    /// Applied to every record arriving off the wire, so a processed
    /// artifact is never paired with a non-completed status.
    pub fn scrub_artifacts(&mut self) {
        if self.status != JobStatus::Completed {
            self.processed_video = None;
        }
    }
}
