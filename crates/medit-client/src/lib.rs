//! Job lifecycle client for the MotionEdit processing backend.
//!
//! Submits a video-processing job, polls its status on an interval until a
//! terminal state is observed, and exposes the tracked job record to any
//! consumer through a watch channel:
//!
//! ```ignore
//! let client = JobClient::from_env()?;
//! let tracker = JobTracker::new(client);
//! let mut updates = tracker.subscribe();
//!
//! tracker.submit("clip.mp4", bytes, Style::Cinematic).await?;
//! while updates.changed().await.is_ok() {
//!     if let Some(job) = updates.borrow_and_update().clone() {
//!         println!("{}: {}", job.status, job.status.label());
//!         if job.is_terminal() {
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod tracker;

pub use client::JobClient;
pub use config::BackendConfig;
pub use error::{ClientError, ClientResult};
pub use poller::PollHandle;
pub use tracker::JobTracker;
