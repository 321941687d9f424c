//! Self-rescheduling status poll loop.
//!
//! One loop runs per tracked job. Each iteration waits out the poll
//! interval, issues a single status request, applies the response, and
//! repeats until a terminal status is observed or the handle is cancelled.
//! The next wait only starts after the current request settles, so at most
//! one status request is ever in flight.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use medit_models::JobRecord;

use crate::client::JobClient;

/// Handle to a running poll loop.
///
/// Dropping the handle does not stop the loop; call [`PollHandle::cancel`]
/// for deterministic cancellation. After cancellation no further update is
/// published, including from a request already in flight.
pub struct PollHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the loop.
    ///
    /// Effective immediately for all future ticks; a response already in
    /// flight is discarded when it arrives.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop task to exit.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawn a poll loop for `job`, publishing each applied update into
/// `updates`.
///
/// A job already in a terminal state produces a loop that exits without
/// issuing a single request.
pub(crate) fn spawn_poll_loop(
    client: Arc<JobClient>,
    job: JobRecord,
    updates: Arc<watch::Sender<Option<JobRecord>>>,
) -> PollHandle {
    let (cancel, cancel_rx) = watch::channel(false);
    let task = tokio::spawn(poll_loop(client, job, updates, cancel_rx));
    PollHandle { cancel, task }
}

async fn poll_loop(
    client: Arc<JobClient>,
    mut current: JobRecord,
    updates: Arc<watch::Sender<Option<JobRecord>>>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let interval = client.config().poll_interval;
    let max_attempts = client.config().max_poll_attempts;
    let job_id = current.job_id.clone();
    let mut attempts = 0u32;

    loop {
        // Level-triggered stop: a job already known to be terminal never
        // triggers another request.
        if current.status.is_terminal() {
            debug!(job_id = %job_id, status = %current.status, "Terminal status reached, polling stopped");
            break;
        }
        if *cancel_rx.borrow() {
            debug!(job_id = %job_id, "Polling cancelled");
            break;
        }
        if let Some(max) = max_attempts {
            if attempts >= max {
                warn!(job_id = %job_id, attempts, "Poll attempt budget exhausted, abandoning job");
                break;
            }
        }

        tokio::select! {
            changed = cancel_rx.changed() => {
                if changed.is_err() || *cancel_rx.borrow() {
                    debug!(job_id = %job_id, "Polling cancelled");
                    break;
                }
                continue;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        // A cancellation racing the tick wins over the elapsed timer.
        if *cancel_rx.borrow() {
            debug!(job_id = %job_id, "Polling cancelled");
            break;
        }

        attempts += 1;

        match client.fetch_status(&job_id).await {
            Ok(record) => {
                if *cancel_rx.borrow() {
                    debug!(job_id = %job_id, "Discarding response received after cancellation");
                    break;
                }
                if record.job_id != job_id {
                    warn!(job_id = %job_id, got = %record.job_id, "Response for a different job, ignoring");
                    continue;
                }

                debug!(job_id = %job_id, status = %record.status, "Applied status update");
                current = record.clone();
                updates.send_replace(Some(record));
            }
            Err(e) => {
                // Transient: state stays untouched and the loop stays on
                // schedule for the next tick.
                warn!(job_id = %job_id, error = %e, "Status check failed, retrying next tick");
            }
        }
    }
}
