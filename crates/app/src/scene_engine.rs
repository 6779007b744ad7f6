//! Scene engine: plays a scene's actions against the light store.
//!
//! Actions of one run are strictly sequential; a [`Action::Delay`] suspends
//! only the run it belongs to. How independent runs relate to each other is
//! decided by the engine's [`OverlapPolicy`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use scenepad_domain::event::{Event, EventKind};
use scenepad_domain::id::SceneId;
use scenepad_domain::scene::{Action, OverlapPolicy, Scene};

use crate::light_store::LightStateStore;
use crate::ports::{EventPublisher, LightObserver};

/// Identifier of a single scene run, unique per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

impl RunId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Cooperative cancellation flag shared between a run and whoever may stop it.
///
/// Checked between actions and raced against every delay.
#[derive(Debug, Clone)]
pub struct CancelToken(Arc<watch::Sender<bool>>);

impl Default for CancelToken {
    fn default() -> Self {
        Self(Arc::new(watch::Sender::new(false)))
    }
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once [`CancelToken::cancel`] has been called.
    pub async fn cancelled(&self) {
        let mut receiver = self.0.subscribe();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only fails on drop.
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

/// A run registered with a [`SceneEngine`] that has not executed yet.
#[derive(Debug)]
pub struct ScheduledRun {
    id: RunId,
    token: CancelToken,
}

impl ScheduledRun {
    #[must_use]
    pub fn id(&self) -> RunId {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

/// Executes scenes against a shared [`LightStateStore`].
pub struct SceneEngine<O, P> {
    store: Arc<LightStateStore<O>>,
    publisher: P,
    policy: OverlapPolicy,
    run_lock: tokio::sync::Mutex<()>,
    active: Mutex<Vec<(RunId, CancelToken)>>,
    next_run_id: AtomicU64,
}

impl<O, P> SceneEngine<O, P>
where
    O: LightObserver,
    P: EventPublisher,
{
    pub fn new(store: Arc<LightStateStore<O>>, publisher: P, policy: OverlapPolicy) -> Self {
        Self {
            store,
            publisher,
            policy,
            run_lock: tokio::sync::Mutex::new(()),
            active: Mutex::new(Vec::new()),
            next_run_id: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<LightStateStore<O>> {
        &self.store
    }

    /// Number of runs currently registered (executing or waiting their turn).
    pub fn active_runs(&self) -> usize {
        self.active().len()
    }

    /// Cancel every registered run. Returns how many were signalled.
    pub fn cancel_all(&self) -> usize {
        let active = self.active();
        for (_, token) in active.iter() {
            token.cancel();
        }
        active.len()
    }

    /// Run `scene` with a fresh cancellation token.
    pub async fn play(&self, scene_id: &SceneId, scene: &Scene) -> RunOutcome {
        self.run(scene_id, scene, CancelToken::new()).await
    }

    /// Run `scene` to completion or until `token` is cancelled.
    ///
    /// Shorthand for [`SceneEngine::schedule`] followed by
    /// [`SceneEngine::start`].
    pub async fn run(&self, scene_id: &SceneId, scene: &Scene, token: CancelToken) -> RunOutcome {
        let run = self.schedule(scene_id, token);
        self.start(run, scene_id, scene).await
    }

    /// Allocate a run and register it with the engine, without executing it.
    ///
    /// Under [`OverlapPolicy::Supersede`] every run already registered is
    /// cancelled here, so the order of `schedule` calls decides which run
    /// survives even when the runs are started on different tasks.
    pub fn schedule(&self, scene_id: &SceneId, token: CancelToken) -> ScheduledRun {
        let id = RunId(self.next_run_id.fetch_add(1, Ordering::Relaxed) + 1);
        let mut active = self.active();
        if self.policy == OverlapPolicy::Supersede && !active.is_empty() {
            for (_, previous) in active.iter() {
                previous.cancel();
            }
            tracing::debug!(
                %scene_id,
                run_id = %id,
                superseded = active.len(),
                "superseding scene runs"
            );
        }
        active.push((id, token.clone()));
        ScheduledRun { id, token }
    }

    /// Execute a scheduled run.
    ///
    /// Under [`OverlapPolicy::Queue`] and `Supersede` the run waits for the
    /// previous one to release the engine. A run cancelled before it gets to
    /// execute never touches a light and publishes no event.
    pub async fn start(&self, run: ScheduledRun, scene_id: &SceneId, scene: &Scene) -> RunOutcome {
        let ScheduledRun { id: run_id, token } = run;

        let guard = match self.policy {
            OverlapPolicy::Concurrent => None,
            OverlapPolicy::Queue | OverlapPolicy::Supersede => {
                tokio::select! {
                    guard = self.run_lock.lock() => Some(guard),
                    () = token.cancelled() => None,
                }
            }
        };
        if token.is_cancelled() {
            drop(guard);
            self.unregister(run_id);
            tracing::debug!(%scene_id, %run_id, "scene run cancelled before start");
            return RunOutcome::Cancelled;
        }

        tracing::info!(%scene_id, %run_id, actions = scene.actions.len(), "scene run started");
        self.publish(EventKind::SceneStarted {
            scene_id: scene_id.clone(),
            run_id: run_id.get(),
        })
        .await;

        let outcome = self.execute(scene, &token).await;

        drop(guard);
        self.unregister(run_id);

        tracing::info!(%scene_id, %run_id, ?outcome, "scene run finished");
        self.publish(EventKind::SceneFinished {
            scene_id: scene_id.clone(),
            run_id: run_id.get(),
            cancelled: outcome == RunOutcome::Cancelled,
        })
        .await;

        outcome
    }

    async fn execute(&self, scene: &Scene, token: &CancelToken) -> RunOutcome {
        for action in &scene.actions {
            if token.is_cancelled() {
                return RunOutcome::Cancelled;
            }
            match action {
                Action::SetLight { target_id, state } => {
                    if self.store.merge(target_id, state).is_none() {
                        tracing::warn!(light_id = %target_id, "scene targets unknown light");
                    }
                }
                Action::AllOff => {
                    self.store.set_all(false);
                }
                Action::Delay { duration_ms } => {
                    tokio::select! {
                        () = tokio::time::sleep(Duration::from_millis(*duration_ms)) => {}
                        () = token.cancelled() => return RunOutcome::Cancelled,
                    }
                }
            }
        }
        RunOutcome::Completed
    }

    async fn publish(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)).await {
            tracing::warn!(%err, "failed to publish scene event");
        }
    }

    fn unregister(&self, run_id: RunId) {
        self.active().retain(|(id, _)| *id != run_id);
    }

    fn active(&self) -> std::sync::MutexGuard<'_, Vec<(RunId, CancelToken)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use super::*;
    use scenepad_domain::error::ScenepadError;
    use scenepad_domain::id::LightId;
    use scenepad_domain::light::{Light, LightPatch};

    #[derive(Default)]
    struct RecordingPublisher(Mutex<Vec<EventKind>>);

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), ScenepadError>> + Send {
            self.0.lock().unwrap().push(event.kind);
            async { Ok(()) }
        }
    }

    type Engine = Arc<SceneEngine<(), Arc<RecordingPublisher>>>;

    fn engine(policy: OverlapPolicy) -> (Engine, Arc<RecordingPublisher>) {
        let lights = ["light1", "light2", "light3"]
            .into_iter()
            .map(|id| Light::builder().id(id).name(id).build().unwrap())
            .collect();
        let store = Arc::new(LightStateStore::new(lights, ()));
        let publisher = Arc::new(RecordingPublisher::default());
        let engine = SceneEngine::new(store, Arc::clone(&publisher), policy);
        (Arc::new(engine), publisher)
    }

    fn light(engine: &Engine, id: &str) -> Light {
        engine.store().get(&LightId::new(id)).unwrap()
    }

    fn bathroom() -> Scene {
        Scene::new(
            "Late Night Bathroom",
            vec![
                Action::set_light(
                    "light3",
                    LightPatch {
                        is_on: Some(true),
                        brightness: Some(10),
                        color: None,
                    },
                ),
                Action::delay(Duration::from_secs(30)),
                Action::set_light("light3", LightPatch::power(false)),
            ],
        )
    }

    fn spawn_run(engine: &Engine, id: &str, scene: Scene) -> tokio::task::JoinHandle<RunOutcome> {
        let engine = Arc::clone(engine);
        let scene_id = SceneId::new(id);
        tokio::spawn(async move { engine.play(&scene_id, &scene).await })
    }

    #[tokio::test(start_paused = true)]
    async fn should_hold_state_until_delay_elapses() {
        let (engine, _) = engine(OverlapPolicy::Supersede);

        let run = spawn_run(&engine, "lateNightBathroom", bathroom());
        tokio::time::sleep(Duration::from_millis(1)).await;

        let lit = light(&engine, "light3");
        assert!(lit.is_on);
        assert_eq!(lit.brightness, 10);

        tokio::time::sleep(Duration::from_millis(29_998)).await;
        assert!(light(&engine, "light3").is_on);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let off = light(&engine, "light3");
        assert!(!off.is_on);
        assert_eq!(off.brightness, 10);

        assert_eq!(run.await.unwrap(), RunOutcome::Completed);
        assert_eq!(engine.active_runs(), 0);
    }

    #[tokio::test]
    async fn should_switch_everything_off_on_all_off() {
        let (engine, _) = engine(OverlapPolicy::Supersede);
        for (id, brightness, color) in [
            ("light1", 35, "#ff8800"),
            ("light2", 80, "#4a0080"),
            ("light3", 5, "#00ff00"),
        ] {
            let patch = LightPatch {
                is_on: Some(true),
                brightness: Some(brightness),
                color: Some(color.into()),
            };
            engine.store().merge(&LightId::new(id), &patch);
        }
        let expected: Vec<Light> = engine
            .store()
            .all()
            .into_iter()
            .map(|light| Light {
                is_on: false,
                ..light
            })
            .collect();

        let outcome = engine
            .play(&SceneId::new("goodnight"), &Scene::new("Goodnight", vec![Action::AllOff]))
            .await;

        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(engine.store().all(), expected);
    }

    #[tokio::test]
    async fn should_skip_unknown_light_and_continue() {
        let (engine, _) = engine(OverlapPolicy::Concurrent);
        let scene = Scene::new(
            "Partial",
            vec![
                Action::set_light("ghost", LightPatch::power(true)),
                Action::set_light("light1", LightPatch::power(true)),
            ],
        );

        let outcome = engine.play(&SceneId::new("partial"), &scene).await;

        assert_eq!(outcome, RunOutcome::Completed);
        assert!(light(&engine, "light1").is_on);
    }

    #[tokio::test]
    async fn should_publish_started_and_finished_events() {
        let (engine, publisher) = engine(OverlapPolicy::Supersede);
        let scene = Scene::new("One", vec![Action::AllOff]);

        engine.play(&SceneId::new("one"), &scene).await;

        let events = publisher.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                EventKind::SceneStarted {
                    scene_id: SceneId::new("one"),
                    run_id: 1,
                },
                EventKind::SceneFinished {
                    scene_id: SceneId::new("one"),
                    run_id: 1,
                    cancelled: false,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_cancel_in_flight_run_when_superseded() {
        let (engine, _) = engine(OverlapPolicy::Supersede);

        let first = spawn_run(&engine, "lateNightBathroom", bathroom());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let dim = Scene::new(
            "Dim",
            vec![Action::set_light(
                "light3",
                LightPatch {
                    brightness: Some(50),
                    ..LightPatch::default()
                },
            )],
        );
        let second = spawn_run(&engine, "dim", dim);

        assert_eq!(first.await.unwrap(), RunOutcome::Cancelled);
        assert_eq!(second.await.unwrap(), RunOutcome::Completed);

        tokio::time::sleep(Duration::from_secs(60)).await;
        let lamp = light(&engine, "light3");
        assert!(lamp.is_on);
        assert_eq!(lamp.brightness, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn should_queue_runs_in_order() {
        let (engine, _) = engine(OverlapPolicy::Queue);

        let first = spawn_run(&engine, "lateNightBathroom", bathroom());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let on = Scene::new("On", vec![Action::set_light("light3", LightPatch::power(true))]);
        let second = spawn_run(&engine, "on", on);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(engine.active_runs(), 2);

        assert_eq!(first.await.unwrap(), RunOutcome::Completed);
        assert_eq!(second.await.unwrap(), RunOutcome::Completed);
        assert!(light(&engine, "light3").is_on);
    }

    #[tokio::test(start_paused = true)]
    async fn should_interleave_concurrent_runs() {
        let (engine, _) = engine(OverlapPolicy::Concurrent);

        let first = spawn_run(&engine, "lateNightBathroom", bathroom());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let on = Scene::new("On", vec![Action::set_light("light1", LightPatch::power(true))]);
        let second = spawn_run(&engine, "on", on);
        assert_eq!(second.await.unwrap(), RunOutcome::Completed);

        assert!(light(&engine, "light1").is_on);
        assert!(light(&engine, "light3").is_on);
        assert_eq!(first.await.unwrap(), RunOutcome::Completed);
        assert!(!light(&engine, "light3").is_on);
    }

    #[tokio::test(start_paused = true)]
    async fn should_cancel_all_runs() {
        let (engine, publisher) = engine(OverlapPolicy::Concurrent);

        let run = spawn_run(&engine, "lateNightBathroom", bathroom());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(engine.cancel_all(), 1);
        assert_eq!(run.await.unwrap(), RunOutcome::Cancelled);
        assert!(light(&engine, "light3").is_on);
        assert!(publisher.0.lock().unwrap().contains(&EventKind::SceneFinished {
            scene_id: SceneId::new("lateNightBathroom"),
            run_id: 1,
            cancelled: true,
        }));
    }

    #[tokio::test]
    async fn should_stop_before_first_action_when_token_already_cancelled() {
        for policy in [
            OverlapPolicy::Concurrent,
            OverlapPolicy::Queue,
            OverlapPolicy::Supersede,
        ] {
            let (engine, publisher) = engine(policy);
            let token = CancelToken::new();
            token.cancel();

            let outcome = engine
                .run(&SceneId::new("lateNightBathroom"), &bathroom(), token)
                .await;

            assert_eq!(outcome, RunOutcome::Cancelled, "{policy:?}");
            assert!(!light(&engine, "light3").is_on, "{policy:?}");
            assert!(publisher.0.lock().unwrap().is_empty(), "{policy:?}");
            assert_eq!(engine.active_runs(), 0, "{policy:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_let_latest_scheduled_run_win_whatever_start_order() {
        let (engine, publisher) = engine(OverlapPolicy::Supersede);
        let earlier_id = SceneId::new("lateNightBathroom");
        let later_id = SceneId::new("on");
        let on = Scene::new("On", vec![Action::set_light("light1", LightPatch::power(true))]);

        let earlier = engine.schedule(&earlier_id, CancelToken::new());
        let later = engine.schedule(&later_id, CancelToken::new());
        assert!(earlier.token().is_cancelled());
        assert!(!later.token().is_cancelled());
        assert_eq!(engine.active_runs(), 2);

        let later_outcome = engine.start(later, &later_id, &on).await;
        let earlier_outcome = engine.start(earlier, &earlier_id, &bathroom()).await;

        assert_eq!(later_outcome, RunOutcome::Completed);
        assert_eq!(earlier_outcome, RunOutcome::Cancelled);
        assert!(light(&engine, "light1").is_on);
        assert!(!light(&engine, "light3").is_on);
        assert_eq!(engine.active_runs(), 0);
        let events = publisher.0.lock().unwrap();
        assert!(events.iter().all(|event| !matches!(
            event,
            EventKind::SceneStarted { scene_id, .. } if *scene_id == earlier_id
        )));
    }
}
