//! # scenepad-adapter-notify-http
//!
//! Forwards every triggered action key to a remote HTTP endpoint.
//!
//! ## Contract
//! `POST <url>` with `{"action": "<key>"}`; the endpoint answers
//! `{"status": "success"|"error", "message": "..."}`. A non-2xx status, a
//! timeout, an unreadable body or `"status": "error"` are all failures.
//! Failures are reported to the caller, which only logs them.
//!
//! ## Dependency rule
//! Depends on `scenepad-app` (for the [`ActionNotifier`] port) and
//! `scenepad-domain` (for the wire types).

pub mod config;
pub mod error;

use scenepad_app::ports::ActionNotifier;
use scenepad_domain::action_key::ActionKey;
use scenepad_domain::error::ScenepadError;
use scenepad_domain::notification::{NotifyRequest, NotifyResponse};

use crate::config::NotifyConfig;
use crate::error::NotifyError;

/// [`ActionNotifier`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpActionNotifier {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpActionNotifier {
    /// Build a notifier posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidUrl`] when `endpoint` does not parse, or
    /// [`NotifyError::Client`] when the TLS backend cannot be initialised.
    pub fn new(endpoint: &str, timeout: std::time::Duration) -> Result<Self, NotifyError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|err| NotifyError::InvalidUrl {
            url: endpoint.to_string(),
            reason: err.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Client)?;
        Ok(Self { client, endpoint })
    }

    /// Build a notifier from configuration; `None` when no URL is set.
    ///
    /// # Errors
    ///
    /// Same as [`HttpActionNotifier::new`].
    pub fn from_config(config: &NotifyConfig) -> Result<Option<Self>, NotifyError> {
        config
            .url
            .as_deref()
            .map(|url| Self::new(url, config.timeout()))
            .transpose()
    }

    #[must_use]
    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    /// Send `action` and decode the endpoint's answer.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Request`] on transport failures and non-2xx
    /// statuses, [`NotifyError::Rejected`] when the body reports an error.
    pub async fn post(&self, action: &ActionKey) -> Result<NotifyResponse, NotifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&NotifyRequest {
                action: action.clone(),
            })
            .send()
            .await
            .map_err(NotifyError::Request)?
            .error_for_status()
            .map_err(NotifyError::Request)?;
        let body: NotifyResponse = response.json().await.map_err(NotifyError::Request)?;
        if !body.is_success() {
            return Err(NotifyError::Rejected {
                message: body.message,
            });
        }
        tracing::debug!(action = %action, endpoint = %self.endpoint, "action forwarded");
        Ok(body)
    }
}

impl ActionNotifier for HttpActionNotifier {
    async fn notify(&self, action: &ActionKey) -> Result<NotifyResponse, ScenepadError> {
        self.post(action).await.map_err(NotifyError::into_domain)
    }
}
