use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::teams::{TeamInput, TeamRow},
    error::AppError,
    routes::identity::JuryIdentity,
    services::roster_service,
    state::SharedState,
};

/// Routes managing the team roster.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team).put(replace_roster))
        .route("/teams/{id}", axum::routing::put(update_team).delete(delete_team))
}

/// All registered teams.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "Registered teams", body = [TeamRow]))
)]
pub async fn list_teams(State(state): State<SharedState>) -> Result<Json<Vec<TeamRow>>, AppError> {
    let rows = roster_service::list_teams(&state).await?;
    Ok(Json(rows))
}

/// Register a new team.
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = TeamInput,
    responses((status = 200, description = "Team registered", body = TeamRow))
)]
pub async fn create_team(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Valid(Json(payload)): Valid<Json<TeamInput>>,
) -> Result<Json<TeamRow>, AppError> {
    let row = roster_service::create_team(&state, payload).await?;
    Ok(Json(row))
}

/// Replace the whole roster in one request.
#[utoipa::path(
    put,
    path = "/teams",
    tag = "teams",
    request_body = [TeamInput],
    responses((status = 200, description = "Roster replaced", body = [TeamRow]))
)]
pub async fn replace_roster(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Json(payload): Json<Vec<TeamInput>>,
) -> Result<Json<Vec<TeamRow>>, AppError> {
    let rows = roster_service::replace_roster(&state, payload).await?;
    Ok(Json(rows))
}

/// Update an existing team.
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "Identifier of the team to update")),
    request_body = TeamInput,
    responses(
        (status = 200, description = "Team updated", body = TeamRow),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Path(id): Path<String>,
    Valid(Json(payload)): Valid<Json<TeamInput>>,
) -> Result<Json<TeamRow>, AppError> {
    let row = roster_service::update_team(&state, id, payload).await?;
    Ok(Json(row))
}

/// Remove a team and every score it received.
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "Identifier of the team to remove")),
    responses(
        (status = 204, description = "Team removed"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode, AppError> {
    roster_service::delete_team(&state, id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
