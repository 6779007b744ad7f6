//! Configuration: which action each gesture of each button triggers.
//!
//! The core only ever reads a configuration snapshot; callers replace it
//! wholesale (e.g. after an edit) rather than mutating it in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action_key::ActionKey;
use crate::button::{ButtonBindings, Gesture};
use crate::id::ButtonId;

/// Mapping `button → gesture → action key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    bindings: BTreeMap<ButtonId, ButtonBindings>,
}

impl Configuration {
    #[must_use]
    pub fn new(bindings: BTreeMap<ButtonId, ButtonBindings>) -> Self {
        Self { bindings }
    }

    /// Bindings shipped with the demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        Self::default()
            .with(
                "btn1",
                ButtonBindings {
                    single: Some("goodnight".into()),
                    double: Some("movieTime".into()),
                    long: Some("lateNightBathroom".into()),
                },
            )
            .with(
                "btn2",
                ButtonBindings {
                    single: Some("movieTime".into()),
                    double: Some(ActionKey::all_lights(true)),
                    long: Some(ActionKey::all_lights(false)),
                },
            )
    }

    /// Builder-style insertion, replacing any previous bindings of `button`.
    #[must_use]
    pub fn with(mut self, button: impl Into<ButtonId>, bindings: ButtonBindings) -> Self {
        self.bindings.insert(button.into(), bindings);
        self
    }

    /// Key bound to `gesture` on `button`, ignoring empty keys.
    #[must_use]
    pub fn action_for(&self, button: &ButtonId, gesture: Gesture) -> Option<&ActionKey> {
        self.bindings.get(button)?.get(gesture)
    }

    #[must_use]
    pub fn bindings(&self, button: &ButtonId) -> Option<&ButtonBindings> {
        self.bindings.get(button)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ButtonId, &ButtonBindings)> {
        self.bindings.iter()
    }
}
