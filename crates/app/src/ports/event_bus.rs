//! Event bus port: publish domain events to interested subscribers.

use std::future::Future;

use scenepad_domain::error::ScenepadError;
use scenepad_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), ScenepadError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), ScenepadError>> + Send {
        (**self).publish(event)
    }
}
