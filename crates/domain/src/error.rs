//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ScenepadError`] at port boundaries.

use crate::button::Gesture;

/// Top-level error shared by every crate of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum ScenepadError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An adapter failed to talk to the outside world.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations, detected when loading or replacing data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("name must not be empty")]
    EmptyName,

    #[error("brightness {0} is out of range 0..=100")]
    BrightnessOutOfRange(u8),

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("scene {0} has no actions")]
    NoActions(String),

    #[error("scene {scene} targets unknown light {light}")]
    UnknownLight { scene: String, light: String },

    #[error("bindings reference unknown button {0}")]
    UnknownButton(String),

    #[error("{gesture} binding of {button} references unknown action {action}")]
    UnknownAction {
        button: String,
        gesture: Gesture,
        action: String,
    },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
