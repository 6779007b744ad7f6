//! Action keys: what a gesture is bound to.
//!
//! A key either names a scene or is one of the reserved bulk keys
//! [`ALL_LIGHTS_ON`] / [`ALL_LIGHTS_OFF`]. An empty key means "do nothing".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::SceneId;

/// Reserved key switching every light on.
pub const ALL_LIGHTS_ON: &str = "allLightsOn";
/// Reserved key switching every light off.
pub const ALL_LIGHTS_OFF: &str = "allLightsOff";

/// Raw action key as stored in the configuration and sent to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(String);

/// What an [`ActionKey`] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Bulk operation: set `is_on` on every light.
    AllLights { is_on: bool },
    /// Play the scene stored under this key.
    Scene(SceneId),
}

impl ActionKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn all_lights(is_on: bool) -> Self {
        Self::new(if is_on { ALL_LIGHTS_ON } else { ALL_LIGHTS_OFF })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is one of the two reserved bulk keys.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        matches!(self.0.as_str(), ALL_LIGHTS_ON | ALL_LIGHTS_OFF)
    }

    /// Classify the key. Empty keys resolve to nothing.
    #[must_use]
    pub fn target(&self) -> Option<ActionTarget> {
        match self.0.as_str() {
            "" => None,
            ALL_LIGHTS_ON => Some(ActionTarget::AllLights { is_on: true }),
            ALL_LIGHTS_OFF => Some(ActionTarget::AllLights { is_on: false }),
            scene => Some(ActionTarget::Scene(SceneId::new(scene))),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&SceneId> for ActionKey {
    fn from(value: &SceneId) -> Self {
        Self::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_reserved_keys_to_bulk_targets() {
        assert_eq!(
            ActionKey::new("allLightsOn").target(),
            Some(ActionTarget::AllLights { is_on: true })
        );
        assert_eq!(
            ActionKey::new("allLightsOff").target(),
            Some(ActionTarget::AllLights { is_on: false })
        );
    }

    #[test]
    fn should_resolve_other_keys_to_scenes() {
        assert_eq!(
            ActionKey::new("goodnight").target(),
            Some(ActionTarget::Scene(SceneId::new("goodnight")))
        );
    }

    #[test]
    fn should_resolve_empty_key_to_nothing() {
        assert_eq!(ActionKey::new("").target(), None);
    }

    #[test]
    fn should_build_reserved_keys() {
        assert!(ActionKey::all_lights(true).is_reserved());
        assert_eq!(ActionKey::all_lights(false).as_str(), "allLightsOff");
        assert!(!ActionKey::new("movieTime").is_reserved());
    }
}
