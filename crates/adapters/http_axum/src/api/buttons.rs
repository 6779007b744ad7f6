//! JSON handlers for buttons: listing, raw presses and direct gestures.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use scenepad_app::dispatcher::Dispatch;
use scenepad_app::ports::{ActionNotifier, ConfigurationSource};
use scenepad_domain::button::{ButtonBindings, Gesture};
use scenepad_domain::error::{NotFoundError, ScenepadError};
use scenepad_domain::id::{ButtonId, SceneId};
use scenepad_domain::press::PressPhase;

use crate::error::ApiError;
use crate::state::AppState;

/// A catalog button with its current bindings.
#[derive(Debug, Serialize)]
pub struct ButtonView {
    pub id: ButtonId,
    pub name: String,
    pub bindings: ButtonBindings,
}

/// Request body for a raw press.
#[derive(Debug, Deserialize)]
pub struct PressRequest {
    pub phase: PressPhase,
}

/// What a directly dispatched gesture did.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchView {
    Unbound,
    AllLights { is_on: bool, lights: usize },
    Scene { scene_id: SceneId },
    UnknownScene { scene_id: SceneId },
}

impl From<Dispatch> for DispatchView {
    fn from(dispatch: Dispatch) -> Self {
        match dispatch {
            Dispatch::Unbound => Self::Unbound,
            Dispatch::AllLights { is_on, lights } => Self::AllLights { is_on, lights },
            // The run keeps going in the background.
            Dispatch::Scene { scene_id, .. } => Self::Scene { scene_id },
            Dispatch::UnknownScene(scene_id) => Self::UnknownScene { scene_id },
        }
    }
}

/// Possible responses from the press endpoint.
pub enum PressResponse {
    Accepted,
}

impl IntoResponse for PressResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `GET /api/buttons`
pub async fn list<N>(State(state): State<AppState<N>>) -> Json<Vec<ButtonView>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let configuration = state.configuration().snapshot();
    let buttons = state
        .dispatcher
        .catalog()
        .buttons
        .iter()
        .map(|button| ButtonView {
            id: button.id.clone(),
            name: button.name.clone(),
            bindings: configuration.bindings(&button.id).cloned().unwrap_or_default(),
        })
        .collect();
    Json(buttons)
}

/// `POST /api/buttons/{id}/press`
pub async fn press<N>(
    State(state): State<AppState<N>>,
    Path(id): Path<ButtonId>,
    Json(request): Json<PressRequest>,
) -> Result<PressResponse, ApiError>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    ensure_known(&state, &id)?;
    state
        .presses
        .send(id, request.phase)
        .await
        .map_err(|err| ScenepadError::Transport(Box::new(err)))?;
    Ok(PressResponse::Accepted)
}

/// `POST /api/buttons/{id}/gestures/{gesture}`
pub async fn gesture<N>(
    State(state): State<AppState<N>>,
    Path((id, gesture)): Path<(ButtonId, Gesture)>,
) -> Result<Json<DispatchView>, ApiError>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    ensure_known(&state, &id)?;
    let dispatch = state.dispatcher.handle_gesture(&id, gesture).await;
    Ok(Json(dispatch.into()))
}

fn ensure_known<N>(state: &AppState<N>, id: &ButtonId) -> Result<(), NotFoundError>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    match state.dispatcher.catalog().button(id) {
        Some(_) => Ok(()),
        None => Err(NotFoundError {
            entity: "Button",
            id: id.to_string(),
        }),
    }
}
