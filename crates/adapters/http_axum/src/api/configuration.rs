//! JSON handlers for the button configuration.

use axum::Json;
use axum::extract::State;

use scenepad_app::ports::{ActionNotifier, ConfigurationSource};
use scenepad_domain::catalog::ActionOption;
use scenepad_domain::configuration::Configuration;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/configuration`
pub async fn get<N>(State(state): State<AppState<N>>) -> Json<Configuration>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    Json(Configuration::clone(&state.configuration().snapshot()))
}

/// `PUT /api/configuration`: replace every binding at once.
pub async fn replace<N>(
    State(state): State<AppState<N>>,
    Json(configuration): Json<Configuration>,
) -> Result<Json<Configuration>, ApiError>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    state
        .configuration()
        .try_replace(state.dispatcher.catalog(), configuration)?;
    Ok(Json(Configuration::clone(&state.configuration().snapshot())))
}

/// `GET /api/configuration/options`: the action keys a binding may use.
pub async fn options<N>(State(state): State<AppState<N>>) -> Json<Vec<ActionOption>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    Json(state.dispatcher.catalog().action_options())
}
