//! Press service: drives the [`PressClassifier`] in real time.
//!
//! Raw inputs arrive over an `mpsc` channel and are stamped with the
//! instant they are received. Between inputs the service sleeps until the
//! classifier's earliest deadline, then polls it. Every classified gesture
//! is handed to the [`GestureSink`].

use tokio::sync::mpsc;
use tokio::time::Instant;

use scenepad_domain::button::Gesture;
use scenepad_domain::id::ButtonId;
use scenepad_domain::press::{PressClassifier, PressPhase, PressTimings};

use crate::ports::GestureSink;

/// One raw button transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressInput {
    pub button_id: ButtonId,
    pub phase: PressPhase,
}

/// Returned when the press service is no longer running.
#[derive(Debug, thiserror::Error)]
#[error("press service stopped")]
pub struct PressServiceStopped;

/// Cloneable handle used to feed raw inputs into a [`PressService`].
#[derive(Debug, Clone)]
pub struct PressSender(mpsc::Sender<PressInput>);

impl PressSender {
    /// Queue one raw transition for `button_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PressServiceStopped`] when the service loop has exited.
    pub async fn send(
        &self,
        button_id: ButtonId,
        phase: PressPhase,
    ) -> Result<(), PressServiceStopped> {
        self.0
            .send(PressInput { button_id, phase })
            .await
            .map_err(|_| PressServiceStopped)
    }
}

/// Owns the classifier and the timer loop around it.
pub struct PressService<S> {
    classifier: PressClassifier,
    inputs: mpsc::Receiver<PressInput>,
    sink: S,
}

impl<S: GestureSink> PressService<S> {
    /// Create the service and the sender that feeds it.
    ///
    /// `capacity` bounds the number of inputs waiting to be classified.
    pub fn new(timings: PressTimings, sink: S, capacity: usize) -> (Self, PressSender) {
        let (sender, inputs) = mpsc::channel(capacity);
        let service = Self {
            classifier: PressClassifier::new(timings),
            inputs,
            sink,
        };
        (service, PressSender(sender))
    }

    /// Run until every [`PressSender`] has been dropped.
    ///
    /// Deadlines still pending at that point are discarded.
    pub async fn run(mut self) {
        tracing::debug!(timings = ?self.classifier.timings(), "press service started");
        loop {
            let deadline = self.classifier.next_deadline();
            tokio::select! {
                input = self.inputs.recv() => {
                    let Some(input) = input else { break };
                    let now = Instant::now().into_std();
                    tracing::trace!(button_id = %input.button_id, phase = ?input.phase, "press input");
                    if let Some(gesture) = self.classifier.handle(&input.button_id, input.phase, now) {
                        self.emit(&input.button_id, gesture).await;
                    }
                }
                () = sleep_until_deadline(deadline) => {
                    let now = Instant::now().into_std();
                    for emission in self.classifier.poll(now) {
                        self.emit(&emission.button_id, emission.gesture).await;
                    }
                }
            }
        }
        tracing::debug!("press service stopped");
    }

    async fn emit(&self, button_id: &ButtonId, gesture: Gesture) {
        tracing::debug!(%button_id, %gesture, "gesture detected");
        self.sink.on_gesture(button_id, gesture).await;
    }
}

async fn sleep_until_deadline(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<(ButtonId, Gesture, Instant)>>);

    impl GestureSink for RecordingSink {
        fn on_gesture(&self, button_id: &ButtonId, gesture: Gesture) -> impl Future<Output = ()> + Send {
            self.0
                .lock()
                .unwrap()
                .push((button_id.clone(), gesture, Instant::now()));
            async {}
        }
    }

    struct Harness {
        sender: PressSender,
        sink: Arc<RecordingSink>,
        started: Instant,
        task: tokio::task::JoinHandle<()>,
    }

    impl Harness {
        fn start() -> Self {
            let sink = Arc::new(RecordingSink::default());
            let (service, sender) = PressService::new(PressTimings::default(), Arc::clone(&sink), 8);
            let task = tokio::spawn(service.run());
            Self {
                sender,
                sink,
                started: Instant::now(),
                task,
            }
        }

        async fn send(&self, button: &str, phase: PressPhase) {
            self.sender.send(ButtonId::new(button), phase).await.unwrap();
        }

        fn gestures(&self) -> Vec<(String, Gesture, Duration)> {
            self.sink
                .0
                .lock()
                .unwrap()
                .iter()
                .map(|(id, gesture, at)| (id.to_string(), *gesture, *at - self.started))
                .collect()
        }
    }

    async fn advance(millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_emit_single_after_double_window() {
        let harness = Harness::start();

        harness.send("btn1", PressPhase::Start).await;
        advance(100).await;
        harness.send("btn1", PressPhase::End).await;
        advance(200).await;
        assert!(harness.gestures().is_empty());

        advance(100).await;
        assert_eq!(
            harness.gestures(),
            vec![("btn1".to_string(), Gesture::Single, Duration::from_millis(350))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_emit_double_on_second_quick_press() {
        let harness = Harness::start();

        harness.send("btn1", PressPhase::Start).await;
        advance(100).await;
        harness.send("btn1", PressPhase::End).await;
        advance(100).await;
        harness.send("btn1", PressPhase::Start).await;
        advance(100).await;
        harness.send("btn1", PressPhase::End).await;
        advance(1_000).await;

        assert_eq!(
            harness.gestures(),
            vec![("btn1".to_string(), Gesture::Double, Duration::from_millis(200))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_emit_long_while_still_held() {
        let harness = Harness::start();

        harness.send("btn2", PressPhase::Start).await;
        advance(600).await;
        assert_eq!(
            harness.gestures(),
            vec![("btn2".to_string(), Gesture::Long, Duration::from_millis(500))]
        );

        harness.send("btn2", PressPhase::End).await;
        advance(1_000).await;
        assert_eq!(harness.gestures().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_emit_nothing_after_cancel() {
        let harness = Harness::start();

        harness.send("btn1", PressPhase::Start).await;
        advance(100).await;
        harness.send("btn1", PressPhase::Cancel).await;
        advance(2_000).await;

        assert!(harness.gestures().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_classify_buttons_independently() {
        let harness = Harness::start();

        harness.send("btn1", PressPhase::Start).await;
        harness.send("btn2", PressPhase::Start).await;
        advance(100).await;
        harness.send("btn2", PressPhase::End).await;
        advance(1_000).await;

        let gestures = harness.gestures();
        assert_eq!(gestures.len(), 2);
        assert!(gestures.contains(&("btn1".to_string(), Gesture::Long, Duration::from_millis(500))));
        assert!(gestures.contains(&("btn2".to_string(), Gesture::Single, Duration::from_millis(350))));
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_every_sender_is_dropped() {
        let harness = Harness::start();
        let Harness { sender, task, .. } = harness;

        drop(sender);

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
