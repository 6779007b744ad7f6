//! Action: one step of a scene.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::id::LightId;
use crate::light::LightPatch;

/// A single step executed by the scene engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Merge `state` into the light identified by `target_id`.
    SetLight {
        target_id: LightId,
        #[serde(default)]
        state: LightPatch,
    },
    /// Switch every light off, keeping brightness and color.
    AllOff,
    /// Suspend the run before continuing with the next action.
    Delay {
        #[serde(alias = "ms")]
        duration_ms: u64,
    },
}

impl Action {
    /// Convenience constructor for [`Action::Delay`].
    #[must_use]
    pub fn delay(duration: Duration) -> Self {
        Self::Delay {
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Convenience constructor for [`Action::SetLight`].
    #[must_use]
    pub fn set_light(target_id: impl Into<LightId>, state: LightPatch) -> Self {
        Self::SetLight {
            target_id: target_id.into(),
            state,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetLight { target_id, .. } => write!(f, "set_light({target_id})"),
            Self::AllOff => f.write_str("all_off"),
            Self::Delay { duration_ms } => write!(f, "delay({duration_ms}ms)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_actions() {
        assert_eq!(
            Action::set_light("light2", LightPatch::power(true)).to_string(),
            "set_light(light2)"
        );
        assert_eq!(Action::AllOff.to_string(), "all_off");
        assert_eq!(
            Action::delay(Duration::from_secs(30)).to_string(),
            "delay(30000ms)"
        );
    }

    #[test]
    fn should_deserialize_set_light_from_tagged_json() {
        let json = serde_json::json!({
            "type": "set_light",
            "target_id": "light3",
            "state": {"is_on": true, "brightness": 10}
        });
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(
            action,
            Action::set_light(
                "light3",
                LightPatch {
                    is_on: Some(true),
                    brightness: Some(10),
                    color: None,
                }
            )
        );
    }

    #[test]
    fn should_deserialize_delay_with_short_alias() {
        let json = serde_json::json!({"type": "delay", "ms": 30000});
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action, Action::Delay { duration_ms: 30000 });
    }

    #[test]
    fn should_deserialize_unit_all_off() {
        let action: Action = serde_json::from_value(serde_json::json!({"type": "all_off"})).unwrap();
        assert_eq!(action, Action::AllOff);
    }
}
