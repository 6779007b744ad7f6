//! Light: the only state-holding thing scenepad controls.
//!
//! A light is created once from the catalog and afterwards only changed
//! through [`LightPatch`] merges: fields absent from the patch keep their
//! current value.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::LightId;

/// Highest accepted brightness, in percent.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Current state of a single light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    pub id: LightId,
    pub name: String,
    #[serde(default)]
    pub is_on: bool,
    /// Brightness in percent, `0..=100`.
    #[serde(default = "default_brightness")]
    pub brightness: u8,
    /// CSS-style color, e.g. `#ffdd99`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_brightness() -> u8 {
    MAX_BRIGHTNESS
}

fn default_color() -> String {
    "#ffffff".to_string()
}

impl Light {
    /// Create a builder for constructing a [`Light`].
    #[must_use]
    pub fn builder() -> LightBuilder {
        LightBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the id or name is empty, or the
    /// brightness exceeds [`MAX_BRIGHTNESS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.brightness > MAX_BRIGHTNESS {
            return Err(ValidationError::BrightnessOutOfRange(self.brightness));
        }
        Ok(())
    }

    /// Merge `patch` into this light. Returns `true` when any field changed.
    pub fn apply(&mut self, patch: &LightPatch) -> bool {
        let mut changed = false;
        if let Some(is_on) = patch.is_on {
            changed |= self.is_on != is_on;
            self.is_on = is_on;
        }
        if let Some(brightness) = patch.brightness {
            changed |= self.brightness != brightness;
            self.brightness = brightness;
        }
        if let Some(color) = &patch.color {
            changed |= self.color != *color;
            self.color.clone_from(color);
        }
        changed
    }
}

/// Field-wise update for a [`Light`]. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LightPatch {
    /// Patch that only switches the light on or off.
    #[must_use]
    pub fn power(is_on: bool) -> Self {
        Self {
            is_on: Some(is_on),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_on.is_none() && self.brightness.is_none() && self.color.is_none()
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] when the patched
    /// brightness exceeds [`MAX_BRIGHTNESS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.brightness {
            Some(value) if value > MAX_BRIGHTNESS => {
                Err(ValidationError::BrightnessOutOfRange(value))
            }
            _ => Ok(()),
        }
    }
}

/// Step-by-step builder for [`Light`].
#[derive(Debug, Default)]
pub struct LightBuilder {
    id: Option<LightId>,
    name: Option<String>,
    is_on: bool,
    brightness: Option<u8>,
    color: Option<String>,
}

impl LightBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<LightId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn is_on(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    #[must_use]
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Consume the builder, validate, and return a [`Light`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if required fields are missing or invalid.
    pub fn build(self) -> Result<Light, ValidationError> {
        let light = Light {
            id: self.id.unwrap_or_else(|| LightId::new("")),
            name: self.name.unwrap_or_default(),
            is_on: self.is_on,
            brightness: self.brightness.unwrap_or_else(default_brightness),
            color: self.color.unwrap_or_else(default_color),
        };
        light.validate()?;
        Ok(light)
    }
}
