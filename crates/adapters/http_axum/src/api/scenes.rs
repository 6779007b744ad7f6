//! JSON handlers for scenes.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use scenepad_app::ports::ActionNotifier;
use scenepad_domain::id::SceneId;
use scenepad_domain::scene::{Action, Scene};

use crate::state::AppState;

/// A catalog scene together with its key.
#[derive(Debug, Serialize)]
pub struct SceneView {
    pub id: SceneId,
    pub name: String,
    pub actions: Vec<Action>,
}

impl SceneView {
    fn new(id: &SceneId, scene: &Scene) -> Self {
        Self {
            id: id.clone(),
            name: scene.name.clone(),
            actions: scene.actions.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: usize,
}

/// `GET /api/scenes`
pub async fn list<N>(State(state): State<AppState<N>>) -> Json<Vec<SceneView>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let scenes = state
        .dispatcher
        .catalog()
        .scenes
        .iter()
        .map(|(id, scene)| SceneView::new(id, scene))
        .collect();
    Json(scenes)
}

/// `POST /api/scenes/cancel`: stop every scene run in flight.
pub async fn cancel<N>(State(state): State<AppState<N>>) -> Json<CancelResponse>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let cancelled = state.dispatcher.engine().cancel_all();
    tracing::info!(cancelled, "scene runs cancelled");
    Json(CancelResponse { cancelled })
}
