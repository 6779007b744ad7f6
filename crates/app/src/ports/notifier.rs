//! Notification port: tells a remote party which action was triggered.
//!
//! The dispatcher fires notifications without waiting for them; whatever the
//! remote answers, local light state stays authoritative.

use std::future::Future;

use scenepad_domain::action_key::ActionKey;
use scenepad_domain::error::ScenepadError;
use scenepad_domain::notification::NotifyResponse;

/// Sends `{action}` to a remote endpoint and returns its `{status, message}`.
pub trait ActionNotifier {
    fn notify(
        &self,
        action: &ActionKey,
    ) -> impl Future<Output = Result<NotifyResponse, ScenepadError>> + Send;
}

impl<T: ActionNotifier + Send + Sync> ActionNotifier for std::sync::Arc<T> {
    fn notify(
        &self,
        action: &ActionKey,
    ) -> impl Future<Output = Result<NotifyResponse, ScenepadError>> + Send {
        (**self).notify(action)
    }
}

/// `None` disables remote notification: every call succeeds locally.
impl<T: ActionNotifier + Send + Sync> ActionNotifier for Option<T> {
    async fn notify(&self, action: &ActionKey) -> Result<NotifyResponse, ScenepadError> {
        match self {
            Some(inner) => inner.notify(action).await,
            None => Ok(NotifyResponse::skipped(action)),
        }
    }
}
