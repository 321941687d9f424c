//! Current-job ownership and observation.
//!
//! [`JobTracker`] owns the single "current job" slot. Consumers subscribe
//! to a watch channel and read snapshots; the only writers are
//! [`JobTracker::submit`] / [`JobTracker::track`] and the poll loop they
//! spawn.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info};

use medit_models::{JobRecord, JobStatus, Style};

use crate::client::JobClient;
use crate::error::ClientResult;
use crate::poller::{spawn_poll_loop, PollHandle};

/// Tracks one job at a time from submission to a terminal state.
pub struct JobTracker {
    client: Arc<JobClient>,
    updates: Arc<watch::Sender<Option<JobRecord>>>,
    active: Mutex<Option<PollHandle>>,
}

impl JobTracker {
    /// Create a tracker around an existing client.
    pub fn new(client: JobClient) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            client: Arc::new(client),
            updates: Arc::new(updates),
            active: Mutex::new(None),
        }
    }

    /// Subscribe to job updates.
    ///
    /// `None` means no job has been submitted yet. An idle record marks a
    /// submission that has not reached the backend; anything else is
    /// backend-reported state. Subscribers must treat values as read-only.
    pub fn subscribe(&self) -> watch::Receiver<Option<JobRecord>> {
        self.updates.subscribe()
    }

    /// Snapshot of the current job, if any.
    pub fn current(&self) -> Option<JobRecord> {
        self.updates.borrow().clone()
    }

    /// The underlying backend client.
    pub fn client(&self) -> &JobClient {
        &self.client
    }

    /// Submit a new job, replacing whatever was tracked before.
    ///
    /// Any previous poll loop is cancelled before the upload starts, so no
    /// update from the old job fires once this call begins. On submission
    /// failure the slot is left at the idle placeholder so the caller can
    /// retry.
    pub async fn submit(
        &self,
        file_name: impl Into<String>,
        video: Vec<u8>,
        style: Style,
    ) -> ClientResult<JobRecord> {
        self.stop();
        self.updates.send_replace(Some(JobRecord::idle()));

        let record = self.client.submit(file_name, video, style).await?;
        info!(job_id = %record.job_id, status = %record.status, "Tracking new job");

        self.track(record.clone());
        Ok(record)
    }

    /// Adopt an existing job record and poll it to a terminal state,
    /// replacing whatever was tracked before.
    ///
    /// A record that is already terminal (or still idle) is published but
    /// not polled.
    pub fn track(&self, record: JobRecord) {
        self.stop();

        let poll = !record.status.is_terminal() && record.status != JobStatus::Idle;
        self.updates.send_replace(Some(record.clone()));

        if poll {
            let handle = spawn_poll_loop(
                Arc::clone(&self.client),
                record,
                Arc::clone(&self.updates),
            );
            self.set_active(Some(handle));
        }
    }

    /// Stop tracking the current job without clearing the slot.
    pub fn stop(&self) {
        if let Some(handle) = self.set_active(None) {
            debug!("Cancelling active poll loop");
            handle.cancel();
        }
    }

    /// Abandon the current job entirely: stop polling and clear the slot.
    pub fn reset(&self) {
        self.stop();
        self.updates.send_replace(None);
    }

    fn set_active(&self, handle: Option<PollHandle>) -> Option<PollHandle> {
        let mut guard = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, handle)
    }
}
