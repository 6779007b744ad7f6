//! Shared application state for axum handlers.

use std::sync::Arc;

use scenepad_app::configuration::SharedConfiguration;
use scenepad_app::dispatcher::ActionDispatcher;
use scenepad_app::event_bus::InProcessEventBus;
use scenepad_app::light_store::LightStateStore;
use scenepad_app::ports::ActionNotifier;
use scenepad_app::press_service::{PressSender, PressService};
use scenepad_app::scene_engine::SceneEngine;
use scenepad_domain::catalog::Catalog;
use scenepad_domain::configuration::Configuration;
use scenepad_domain::press::PressTimings;
use scenepad_domain::scene::OverlapPolicy;

const EVENT_BUS_CAPACITY: usize = 256;
const PRESS_QUEUE_CAPACITY: usize = 64;

/// Event bus shared by the light store, the scene engine and the SSE stream.
pub type SharedEventBus = Arc<InProcessEventBus>;

/// The dispatcher as wired by the HTTP adapter: configuration behind an
/// `Arc`, every observer and publisher backed by the event bus.
pub type Dispatcher<N> =
    ActionDispatcher<Arc<SharedConfiguration>, SharedEventBus, N, SharedEventBus>;

/// Application state shared across all axum handlers.
///
/// Generic over the action notifier to avoid dynamic dispatch. `Clone` is
/// implemented manually so `N` itself does not need to be `Clone`.
pub struct AppState<N> {
    /// Resolves gestures; also owns the catalog, the light store and the
    /// scene engine.
    pub dispatcher: Arc<Dispatcher<N>>,
    /// Feeds raw presses to the press service.
    pub presses: PressSender,
    /// Source of the SSE stream.
    pub event_bus: SharedEventBus,
}

impl<N> Clone for AppState<N> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            presses: self.presses.clone(),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<N> AppState<N> {
    pub fn new(
        dispatcher: Arc<Dispatcher<N>>,
        presses: PressSender,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            dispatcher,
            presses,
            event_bus,
        }
    }
}

impl<N> AppState<N>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    /// Wire the whole core around one event bus.
    ///
    /// The returned [`PressService`] is not running yet; the caller spawns
    /// [`PressService::run`] on its runtime.
    pub fn build(
        catalog: Catalog,
        configuration: Configuration,
        notifier: N,
        timings: PressTimings,
        overlap: OverlapPolicy,
    ) -> (Self, PressService<Arc<Dispatcher<N>>>) {
        let event_bus = Arc::new(InProcessEventBus::new(EVENT_BUS_CAPACITY));
        let store = Arc::new(LightStateStore::new(
            catalog.lights.clone(),
            Arc::clone(&event_bus),
        ));
        let engine = Arc::new(SceneEngine::new(store, Arc::clone(&event_bus), overlap));
        let dispatcher = Arc::new(ActionDispatcher::new(
            Arc::new(SharedConfiguration::new(configuration)),
            Arc::new(catalog),
            engine,
            Arc::new(notifier),
            Arc::clone(&event_bus),
        ));
        let (press_service, presses) =
            PressService::new(timings, Arc::clone(&dispatcher), PRESS_QUEUE_CAPACITY);
        (Self::new(dispatcher, presses, event_bus), press_service)
    }

    pub fn configuration(&self) -> &Arc<SharedConfiguration> {
        self.dispatcher.configuration()
    }
}
