//! Notification endpoint configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where triggered action keys are forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Endpoint receiving `POST {"action": "<key>"}`. Notifications are
    /// disabled when absent.
    pub url: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl NotifyConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: 2_000,
        }
    }
}
