//! Settings handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::SettingsDto;
use crate::state::AppState;

/// Get the effective server settings.
pub async fn get(State(state): State<AppState>) -> Json<SettingsDto> {
    Json(SettingsDto::from(&state.settings))
}
