//! Scene: a named, ordered list of actions applied to lights.
//!
//! Scenes are loaded once from the catalog and never mutated afterwards.
//! The scene engine plays the actions strictly in order, waiting out every
//! [`Action::Delay`] before moving on.

mod action;

pub use action::Action;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::LightId;

/// How a new scene run relates to runs already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Runs interleave freely; the last write to a light wins.
    Concurrent,
    /// Runs execute one after another in trigger order.
    Queue,
    /// A new run cancels every run in flight, then executes.
    #[default]
    Supersede,
}

/// A named sequence of [`Action`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Human readable name, e.g. `"Late Night Bathroom"`.
    pub name: String,
    pub actions: Vec<Action>,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// Check domain invariants against the set of known lights.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is empty, the scene has no
    /// actions, a patch is out of range, or a `set_light` action targets a
    /// light for which `is_known` returns `false`.
    pub fn validate(&self, is_known: impl Fn(&LightId) -> bool) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions(self.name.clone()));
        }
        for action in &self.actions {
            if let Action::SetLight { target_id, state } = action {
                state.validate()?;
                if !is_known(target_id) {
                    return Err(ValidationError::UnknownLight {
                        scene: self.name.clone(),
                        light: target_id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Sum of every delay in the scene, in milliseconds.
    #[must_use]
    pub fn total_delay_ms(&self) -> u64 {
        self.actions
            .iter()
            .map(|action| match action {
                Action::Delay { duration_ms } => *duration_ms,
                _ => 0,
            })
            .fold(0, u64::saturating_add)
    }
}
