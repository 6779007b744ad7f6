//! Typed identifier newtypes.
//!
//! Catalog identifiers (lights, buttons, scenes) are human-chosen slugs such
//! as `"light1"` or `"goodnight"`. Event identifiers are random UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_slug_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a slug.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the inner slug.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Reject empty slugs.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyId`] when the slug is empty or blank.
            pub fn validate(&self) -> Result<(), ValidationError> {
                if self.0.trim().is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = Self::new(s);
                id.validate()?;
                Ok(id)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_slug_id!(
    /// Unique identifier for a [`Light`](crate::light::Light).
    LightId
);

define_slug_id!(
    /// Unique identifier for a [`Button`](crate::button::Button).
    ButtonId
);

define_slug_id!(
    /// Key under which a [`Scene`](crate::scene::Scene) is stored and referenced
    /// by action keys.
    SceneId
);

/// Unique identifier for an [`Event`](crate::event::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl Default for EventId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl EventId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
