//! JSON handlers for lights.

use axum::Json;
use axum::extract::{Path, State};

use scenepad_app::ports::ActionNotifier;
use scenepad_domain::error::NotFoundError;
use scenepad_domain::id::LightId;
use scenepad_domain::light::Light;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/lights`
pub async fn list<N>(State(state): State<AppState<N>>) -> Json<Vec<Light>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    Json(state.dispatcher.store().all())
}

/// `GET /api/lights/{id}`
pub async fn get<N>(
    State(state): State<AppState<N>>,
    Path(id): Path<LightId>,
) -> Result<Json<Light>, ApiError>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let light = state.dispatcher.store().get(&id).ok_or_else(|| NotFoundError {
        entity: "Light",
        id: id.to_string(),
    })?;
    Ok(Json(light))
}
