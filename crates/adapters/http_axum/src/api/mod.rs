//! JSON API handler modules.

pub mod action;
#[allow(clippy::missing_errors_doc)]
pub mod buttons;
#[allow(clippy::missing_errors_doc)]
pub mod configuration;
#[allow(clippy::missing_errors_doc)]
pub mod lights;
pub mod scenes;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use scenepad_app::ports::ActionNotifier;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<N>() -> Router<AppState<N>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    Router::new()
        // Lights
        .route("/lights", get(lights::list::<N>))
        .route("/lights/{id}", get(lights::get::<N>))
        // Buttons
        .route("/buttons", get(buttons::list::<N>))
        .route("/buttons/{id}/press", post(buttons::press::<N>))
        .route(
            "/buttons/{id}/gestures/{gesture}",
            post(buttons::gesture::<N>),
        )
        // Scenes
        .route("/scenes", get(scenes::list::<N>))
        .route("/scenes/cancel", post(scenes::cancel::<N>))
        // Configuration
        .route(
            "/configuration",
            get(configuration::get::<N>).put(configuration::replace::<N>),
        )
        .route("/configuration/options", get(configuration::options::<N>))
        // Remote action endpoint
        .route(
            "/action",
            post(action::receive).fallback(action::method_not_allowed),
        )
        // Live events
        .route("/events/stream", get(sse::stream::<N>))
}
