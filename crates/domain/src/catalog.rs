//! Catalog: the buttons, lights and scenes known to the system.
//!
//! The catalog is loaded once at startup and validated as a whole. It is
//! also the authority used to validate a [`Configuration`] before it is
//! accepted.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::action_key::{ALL_LIGHTS_OFF, ALL_LIGHTS_ON, ActionKey, ActionTarget};
use crate::button::Button;
use crate::configuration::Configuration;
use crate::error::ValidationError;
use crate::id::{ButtonId, LightId, SceneId};
use crate::light::{Light, LightPatch};
use crate::scene::{Action, Scene};

/// Everything the core needs to know about the installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub buttons: Vec<Button>,
    pub lights: Vec<Light>,
    pub scenes: BTreeMap<SceneId, Scene>,
}

/// One entry of the list an editor may offer for a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub key: ActionKey,
    pub label: String,
}

impl Catalog {
    /// Two buttons, three lights and three scenes.
    #[must_use]
    pub fn demo() -> Self {
        let light = |id: &str, name: &str, brightness: u8, color: &str| Light {
            id: LightId::new(id),
            name: name.to_string(),
            is_on: false,
            brightness,
            color: color.to_string(),
        };
        let patch = |is_on: bool, brightness: Option<u8>, color: Option<&str>| LightPatch {
            is_on: Some(is_on),
            brightness,
            color: color.map(str::to_string),
        };

        let mut scenes = BTreeMap::new();
        scenes.insert(
            SceneId::new("goodnight"),
            Scene::new("Goodnight", vec![Action::AllOff]),
        );
        scenes.insert(
            SceneId::new("movieTime"),
            Scene::new(
                "Movie Time",
                vec![Action::set_light(
                    "light2",
                    patch(true, Some(20), Some("#4a0080")),
                )],
            ),
        );
        scenes.insert(
            SceneId::new("lateNightBathroom"),
            Scene::new(
                "Late Night Bathroom",
                vec![
                    Action::set_light("light3", patch(true, Some(10), Some("#ffdd99"))),
                    Action::Delay { duration_ms: 30_000 },
                    Action::set_light("light3", LightPatch::power(false)),
                ],
            ),
        );

        Self {
            buttons: vec![
                Button::new("btn1", "Bedside Button"),
                Button::new("btn2", "Living Room Button"),
            ],
            lights: vec![
                light("light1", "Bedroom Lamp", 100, "#ffffff"),
                light("light2", "Living Room Main", 100, "#ffffff"),
                light("light3", "Hallway Light", 30, "#ffdd99"),
            ],
            scenes,
        }
    }

    #[must_use]
    pub fn button(&self, id: &ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|button| button.id == *id)
    }

    #[must_use]
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Check every catalog invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: invalid or duplicate
    /// buttons and lights, scenes shadowing a reserved key, or invalid scenes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for button in &self.buttons {
            button.validate()?;
            if !seen.insert(button.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    kind: "button",
                    id: button.id.to_string(),
                });
            }
        }

        let mut lights = HashSet::new();
        for light in &self.lights {
            light.validate()?;
            if !lights.insert(&light.id) {
                return Err(ValidationError::DuplicateId {
                    kind: "light",
                    id: light.id.to_string(),
                });
            }
        }

        for (id, scene) in &self.scenes {
            id.validate()?;
            if matches!(id.as_str(), ALL_LIGHTS_ON | ALL_LIGHTS_OFF) {
                return Err(ValidationError::DuplicateId {
                    kind: "scene",
                    id: id.to_string(),
                });
            }
            scene.validate(|light| lights.contains(light))?;
        }
        Ok(())
    }

    /// Check that `config` only binds known buttons to resolvable keys.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownButton`] or
    /// [`ValidationError::UnknownAction`].
    pub fn validate_configuration(&self, config: &Configuration) -> Result<(), ValidationError> {
        for (button, bindings) in config.iter() {
            if self.button(button).is_none() {
                return Err(ValidationError::UnknownButton(button.to_string()));
            }
            for (gesture, key) in bindings.iter() {
                let resolvable = match key.target() {
                    Some(ActionTarget::Scene(scene)) => self.scenes.contains_key(&scene),
                    Some(ActionTarget::AllLights { .. }) | None => true,
                };
                if !resolvable {
                    return Err(ValidationError::UnknownAction {
                        button: button.to_string(),
                        gesture,
                        action: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Every choice an editor may offer for a binding: nothing, each scene,
    /// then the two bulk operations.
    #[must_use]
    pub fn action_options(&self) -> Vec<ActionOption> {
        let mut options = vec![ActionOption {
            key: ActionKey::new(""),
            label: "-- Do Nothing --".to_string(),
        }];
        options.extend(self.scenes.iter().map(|(id, scene)| ActionOption {
            key: ActionKey::from(id),
            label: scene.name.clone(),
        }));
        options.push(ActionOption {
            key: ActionKey::all_lights(true),
            label: "Turn All Lights On".to_string(),
        });
        options.push(ActionOption {
            key: ActionKey::all_lights(false),
            label: "Turn All Lights Off".to_string(),
        });
        options
    }
}
