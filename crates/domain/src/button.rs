//! Buttons and the gestures they produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action_key::ActionKey;
use crate::error::ValidationError;
use crate::id::ButtonId;

/// A physical push button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub id: ButtonId,
    pub name: String,
}

impl Button {
    #[must_use]
    pub fn new(id: impl Into<ButtonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] when the id or name is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Classified outcome of a press interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Single,
    Double,
    Long,
}

impl Gesture {
    pub const ALL: [Self; 3] = [Self::Single, Self::Double, Self::Long];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gesture name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gesture {0:?}")]
pub struct ParseGestureError(String);

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gesture| gesture.as_str() == s)
            .ok_or_else(|| ParseGestureError(s.to_string()))
    }
}

/// Action keys bound to each gesture of one button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonBindings {
    pub single: Option<ActionKey>,
    pub double: Option<ActionKey>,
    pub long: Option<ActionKey>,
}

impl ButtonBindings {
    /// Bound key for `gesture`; empty keys count as unbound.
    #[must_use]
    pub fn get(&self, gesture: Gesture) -> Option<&ActionKey> {
        let key = match gesture {
            Gesture::Single => self.single.as_ref(),
            Gesture::Double => self.double.as_ref(),
            Gesture::Long => self.long.as_ref(),
        };
        key.filter(|key| !key.is_empty())
    }

    /// Iterate over `(gesture, key)` pairs that carry a non-empty key.
    pub fn iter(&self) -> impl Iterator<Item = (Gesture, &ActionKey)> {
        Gesture::ALL
            .into_iter()
            .filter_map(|gesture| self.get(gesture).map(|key| (gesture, key)))
    }
}
