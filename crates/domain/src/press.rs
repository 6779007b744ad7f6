//! Press classifier: turns raw press/release streams into gestures.
//!
//! Every button owns an explicit [`PressState`] holding real timestamps and
//! deadlines. The classifier never schedules anything itself: the caller
//! feeds it inputs stamped with a monotonic [`Instant`], asks for
//! [`next_deadline`](PressClassifier::next_deadline), and calls
//! [`poll`](PressClassifier::poll) once that instant has been reached.
//!
//! ```text
//!            start                    end (quick)
//!   Idle ───────────▶ Pressed ─────────────────────▶ AwaitingSecondPress
//!    ▲                 │  │ end (stray)                 │        │
//!    │    long timer   │  └──────────▶ Idle            │ start  │ deadline
//!    └─── emit Long ◀──┘                    emit Double ◀┘        └▶ emit Single
//! ```
//!
//! Every transition is a total function of `(state, input, now)`; at most one
//! pending deadline exists per button at any instant.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::button::Gesture;
use crate::error::ValidationError;
use crate::id::ButtonId;
use crate::time::elapsed_between;

/// Hold duration after which a press becomes a long press.
pub const LONG_PRESS: Duration = Duration::from_millis(500);
/// Longest press still counted as a quick tap.
pub const QUICK_PRESS: Duration = Duration::from_millis(250);
/// How long to wait after a quick release for a second press.
pub const DOUBLE_WINDOW: Duration = Duration::from_millis(250);

/// Timing thresholds used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressTimings {
    pub long_press: Duration,
    pub quick_press: Duration,
    pub double_window: Duration,
}

impl Default for PressTimings {
    fn default() -> Self {
        Self {
            long_press: LONG_PRESS,
            quick_press: QUICK_PRESS,
            double_window: DOUBLE_WINDOW,
        }
    }
}

impl PressTimings {
    #[must_use]
    pub fn from_millis(long_press: u64, quick_press: u64, double_window: u64) -> Self {
        Self {
            long_press: Duration::from_millis(long_press),
            quick_press: Duration::from_millis(quick_press),
            double_window: Duration::from_millis(double_window),
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroDuration`] if any threshold is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.long_press.is_zero() {
            return Err(ValidationError::ZeroDuration("long_press"));
        }
        if self.quick_press.is_zero() {
            return Err(ValidationError::ZeroDuration("quick_press"));
        }
        if self.double_window.is_zero() {
            return Err(ValidationError::ZeroDuration("double_window"));
        }
        Ok(())
    }
}

/// Raw input coming from a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressPhase {
    Start,
    End,
    Cancel,
}

/// Per-button classification state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Idle,
    /// Button is held; a long press fires at `started + long_press`.
    Pressed { started: Instant },
    /// A quick tap was released; a second press before `deadline` is a double.
    AwaitingSecondPress { deadline: Instant },
}

impl PressState {
    /// The single pending deadline of this state, if any.
    #[must_use]
    pub fn deadline(&self, timings: &PressTimings) -> Option<Instant> {
        match *self {
            Self::Idle => None,
            Self::Pressed { started } => Some(started + timings.long_press),
            Self::AwaitingSecondPress { deadline } => Some(deadline),
        }
    }

    /// Fire the pending deadline if it has been reached.
    fn on_timer(self, now: Instant, timings: &PressTimings) -> (Self, Option<Gesture>) {
        match self.deadline(timings) {
            Some(deadline) if now >= deadline => {
                let gesture = match self {
                    Self::Pressed { .. } => Gesture::Long,
                    _ => Gesture::Single,
                };
                (Self::Idle, Some(gesture))
            }
            _ => (self, None),
        }
    }

    /// Apply an input. Assumes [`on_timer`](Self::on_timer) ran first for `now`.
    fn on_input(
        self,
        phase: PressPhase,
        now: Instant,
        timings: &PressTimings,
    ) -> (Self, Option<Gesture>) {
        match (self, phase) {
            (_, PressPhase::Cancel) => (Self::Idle, None),
            (Self::Idle, PressPhase::Start) => (Self::Pressed { started: now }, None),
            (Self::Idle, PressPhase::End) => (Self::Idle, None),
            (Self::Pressed { .. }, PressPhase::Start) => (self, None),
            (Self::Pressed { started }, PressPhase::End) => {
                if elapsed_between(started, now) > timings.quick_press {
                    (Self::Idle, None)
                } else {
                    let deadline = now + timings.double_window;
                    (Self::AwaitingSecondPress { deadline }, None)
                }
            }
            (Self::AwaitingSecondPress { .. }, PressPhase::Start) => {
                (Self::Idle, Some(Gesture::Double))
            }
            (Self::AwaitingSecondPress { .. }, PressPhase::End) => (self, None),
        }
    }
}

/// Gesture emitted for a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub button_id: ButtonId,
    pub gesture: Gesture,
}

/// Classifies presses of any number of independent buttons.
#[derive(Debug, Default)]
pub struct PressClassifier {
    timings: PressTimings,
    buttons: BTreeMap<ButtonId, PressState>,
}

impl PressClassifier {
    #[must_use]
    pub fn new(timings: PressTimings) -> Self {
        Self {
            timings,
            buttons: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn timings(&self) -> &PressTimings {
        &self.timings
    }

    /// Current state of `button`; buttons never pressed are [`PressState::Idle`].
    #[must_use]
    pub fn state(&self, button: &ButtonId) -> PressState {
        self.buttons.get(button).copied().unwrap_or_default()
    }

    /// Feed one raw input stamped with `now`.
    ///
    /// A deadline that was already due at `now` but not yet polled is fired
    /// first, so the result does not depend on how promptly the caller polls.
    pub fn handle(&mut self, button: &ButtonId, phase: PressPhase, now: Instant) -> Option<Gesture> {
        let timings = self.timings;
        let state = match phase {
            PressPhase::Start => self.buttons.entry(button.clone()).or_default(),
            PressPhase::End | PressPhase::Cancel => self.buttons.get_mut(button)?,
        };
        let (next, fired) = state.on_timer(now, &timings);
        let (next, emitted) = next.on_input(phase, now, &timings);
        *state = next;
        fired.or(emitted)
    }

    pub fn press_start(&mut self, button: &ButtonId, now: Instant) -> Option<Gesture> {
        self.handle(button, PressPhase::Start, now)
    }

    pub fn press_end(&mut self, button: &ButtonId, now: Instant) -> Option<Gesture> {
        self.handle(button, PressPhase::End, now)
    }

    /// Abort the interaction of `button`; nothing is ever emitted for it.
    pub fn press_cancel(&mut self, button: &ButtonId) {
        if let Some(state) = self.buttons.get_mut(button) {
            *state = PressState::Idle;
        }
    }

    /// Fire every deadline reached at `now`, in button order.
    pub fn poll(&mut self, now: Instant) -> Vec<Emission> {
        let timings = self.timings;
        self.buttons
            .iter_mut()
            .filter_map(|(button_id, state)| {
                let (next, fired) = state.on_timer(now, &timings);
                *state = next;
                fired.map(|gesture| Emission {
                    button_id: button_id.clone(),
                    gesture,
                })
            })
            .collect()
    }

    /// Earliest pending deadline across all buttons.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.buttons
            .values()
            .filter_map(|state| state.deadline(&self.timings))
            .min()
    }
}
