//! Client configuration.

use std::time::Duration;

/// Configuration for the job lifecycle client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base origin of the processing backend
    pub base_url: String,
    /// Delay between status polls
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Optional bound on poll attempts per job; unbounded when `None`
    pub max_poll_attempts: Option<u32>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(10),
            max_poll_attempts: None,
        }
    }
}

impl BackendConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            poll_interval: Duration::from_millis(
                std::env::var("POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            max_poll_attempts: std::env::var("MAX_POLL_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the delay between status polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Bound the number of poll attempts per job.
    pub fn with_max_poll_attempts(mut self, max_poll_attempts: u32) -> Self {
        self.max_poll_attempts = Some(max_poll_attempts);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.max_poll_attempts.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = BackendConfig::default()
            .with_base_url("http://backend.internal")
            .with_poll_interval(Duration::from_millis(50))
            .with_max_poll_attempts(5);

        assert_eq!(config.base_url, "http://backend.internal");
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.max_poll_attempts, Some(5));
    }
}
