//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use scenepad_domain::error::ScenepadError;
use scenepad_domain::event::{Event, EventKind};
use scenepad_domain::light::Light;

use crate::ports::{EventPublisher, LightObserver};

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped). The bus doubles as the light store's
/// render hook: every mutation is broadcast as [`EventKind::LightChanged`].
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    fn send(&self, event: Event) {
        // Fails only when nobody is subscribed.
        let _ = self.sender.send(event);
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), ScenepadError>> + Send {
        self.send(event);
        async { Ok(()) }
    }
}

impl LightObserver for InProcessEventBus {
    fn light_changed(&self, light: &Light) {
        self.send(Event::new(EventKind::LightChanged {
            light: light.clone(),
        }));
    }
}
