use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::config::ConfigResponse, state::SharedState};

/// Routes exposing the static scoring configuration.
pub fn router() -> Router<SharedState> {
    Router::new().route("/config", get(get_config))
}

/// Contest universe and jury roster the server aggregates over.
#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    responses((status = 200, description = "Scoring configuration", body = ConfigResponse))
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from(state.config()))
}
