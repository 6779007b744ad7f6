//! Action dispatcher: turns a classified gesture into light changes.
//!
//! Resolution is a lookup in the current configuration snapshot. Reserved
//! keys switch every light at once; any other key names a scene that is
//! handed to the [`SceneEngine`]. Every resolved key is also forwarded to
//! the [`ActionNotifier`] on a detached task whose outcome is only logged.

use std::sync::Arc;

use tokio::task::JoinHandle;

use scenepad_domain::action_key::{ActionKey, ActionTarget};
use scenepad_domain::button::Gesture;
use scenepad_domain::catalog::Catalog;
use scenepad_domain::event::{Event, EventKind};
use scenepad_domain::id::{ButtonId, SceneId};

use crate::light_store::LightStateStore;
use crate::ports::{ActionNotifier, ConfigurationSource, EventPublisher, GestureSink, LightObserver};
use crate::scene_engine::{CancelToken, RunOutcome, SceneEngine};

/// What a dispatch did locally.
#[derive(Debug)]
pub enum Dispatch {
    /// No action bound to the gesture, or the bound key is empty.
    Unbound,
    /// Every light was switched on or off.
    AllLights { is_on: bool, lights: usize },
    /// A scene run was started in the background.
    Scene {
        scene_id: SceneId,
        run: JoinHandle<RunOutcome>,
    },
    /// The key names a scene the catalog does not know.
    UnknownScene(SceneId),
}

/// Routes `(button, gesture)` pairs to bulk light operations or scenes.
pub struct ActionDispatcher<C, O, N, P> {
    configuration: C,
    catalog: Arc<Catalog>,
    engine: Arc<SceneEngine<O, P>>,
    notifier: Arc<N>,
    publisher: P,
}

impl<C, O, N, P> ActionDispatcher<C, O, N, P>
where
    C: ConfigurationSource,
    O: LightObserver + Send + Sync + 'static,
    N: ActionNotifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    pub fn new(
        configuration: C,
        catalog: Arc<Catalog>,
        engine: Arc<SceneEngine<O, P>>,
        notifier: Arc<N>,
        publisher: P,
    ) -> Self {
        Self {
            configuration,
            catalog,
            engine,
            notifier,
            publisher,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn configuration(&self) -> &C {
        &self.configuration
    }

    pub fn engine(&self) -> &Arc<SceneEngine<O, P>> {
        &self.engine
    }

    pub fn store(&self) -> &Arc<LightStateStore<O>> {
        self.engine.store()
    }

    /// Action key bound to `gesture` on `button_id`, if any.
    pub fn resolve(&self, button_id: &ButtonId, gesture: Gesture) -> Option<ActionKey> {
        self.configuration
            .snapshot()
            .action_for(button_id, gesture)
            .cloned()
    }

    /// Resolve and execute the action bound to `gesture` on `button_id`.
    ///
    /// Scene runs are spawned, so this returns as soon as the run is started.
    /// The remote notification never delays or alters the local outcome.
    pub async fn dispatch(&self, button_id: &ButtonId, gesture: Gesture) -> Dispatch {
        let Some(key) = self.resolve(button_id, gesture) else {
            tracing::debug!(%button_id, %gesture, "no action bound");
            return Dispatch::Unbound;
        };
        let Some(target) = key.target() else {
            return Dispatch::Unbound;
        };

        tracing::info!(%button_id, %gesture, action = %key, "action triggered");
        let event = Event::new(EventKind::ActionTriggered {
            button_id: button_id.clone(),
            gesture,
            action: key.clone(),
        });
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(%err, "failed to publish action event");
        }
        self.notify(key);

        match target {
            ActionTarget::AllLights { is_on } => {
                let lights = self.engine.store().set_all(is_on).len();
                Dispatch::AllLights { is_on, lights }
            }
            ActionTarget::Scene(scene_id) => match self.catalog.scene(&scene_id) {
                Some(scene) => {
                    let engine = Arc::clone(&self.engine);
                    let scene = scene.clone();
                    let run_scene_id = scene_id.clone();
                    let scheduled = engine.schedule(&scene_id, CancelToken::new());
                    let run = tokio::spawn(async move {
                        engine.start(scheduled, &run_scene_id, &scene).await
                    });
                    Dispatch::Scene { scene_id, run }
                }
                None => {
                    tracing::warn!(%scene_id, "action references unknown scene");
                    Dispatch::UnknownScene(scene_id)
                }
            },
        }
    }

    /// Record that `gesture` was detected on `button_id`, then dispatch it.
    pub async fn handle_gesture(&self, button_id: &ButtonId, gesture: Gesture) -> Dispatch {
        let event = Event::new(EventKind::GestureDetected {
            button_id: button_id.clone(),
            gesture,
        });
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(%err, "failed to publish gesture event");
        }
        self.dispatch(button_id, gesture).await
    }

    fn notify(&self, key: ActionKey) {
        let notifier = Arc::clone(&self.notifier);
        drop(tokio::spawn(async move {
            match notifier.notify(&key).await {
                Ok(response) if response.is_success() => {
                    tracing::debug!(action = %key, message = %response.message, "action notified");
                }
                Ok(response) => {
                    tracing::warn!(action = %key, message = %response.message, "action notification rejected");
                }
                Err(err) => {
                    tracing::warn!(action = %key, %err, "action notification failed");
                }
            }
        }));
    }
}

impl<C, O, N, P> GestureSink for ActionDispatcher<C, O, N, P>
where
    C: ConfigurationSource + Send + Sync,
    O: LightObserver + Send + Sync + 'static,
    N: ActionNotifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    async fn on_gesture(&self, button_id: &ButtonId, gesture: Gesture) {
        let outcome = self.handle_gesture(button_id, gesture).await;
        tracing::trace!(?outcome, "gesture dispatched");
    }
}
