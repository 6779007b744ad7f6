//! Event: an immutable record of something observers may care about.
//!
//! Renderers subscribe to these to redraw lights; the notification toast of
//! a dashboard is driven by [`EventKind::ActionTriggered`].

use serde::{Deserialize, Serialize};

use crate::action_key::ActionKey;
use crate::button::Gesture;
use crate::id::{ButtonId, EventId, SceneId};
use crate::light::Light;
use crate::time::{Timestamp, now};

/// A timestamped domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A light was mutated; carries the state after the mutation.
    LightChanged { light: Light },
    /// The classifier recognised a gesture.
    GestureDetected { button_id: ButtonId, gesture: Gesture },
    /// A gesture resolved to a non-empty action key.
    ActionTriggered {
        button_id: ButtonId,
        gesture: Gesture,
        action: ActionKey,
    },
    SceneStarted { scene_id: SceneId, run_id: u64 },
    SceneFinished {
        scene_id: SceneId,
        run_id: u64,
        cancelled: bool,
    },
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            timestamp: now(),
            kind,
        }
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}
