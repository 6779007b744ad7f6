//! Notification adapter error types.

use scenepad_domain::error::ScenepadError;

/// Errors specific to the HTTP notification adapter.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid notification endpoint {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed, timed out, returned a non-success status or an
    /// unreadable body.
    #[error("notification request failed")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered with `{"status": "error"}`.
    #[error("notification rejected: {message}")]
    Rejected { message: String },
}

impl NotifyError {
    /// Convert into a [`ScenepadError::Transport`] for propagation across
    /// port boundaries.
    pub fn into_domain(self) -> ScenepadError {
        ScenepadError::Transport(Box::new(self))
    }
}

impl From<NotifyError> for ScenepadError {
    fn from(err: NotifyError) -> Self {
        err.into_domain()
    }
}
