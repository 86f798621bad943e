use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use axum_valid::Valid;

use crate::{
    dto::scores::{ContestScopeQuery, ScoreRow, ScoreboardSnapshot, StandingRow, SubmitScoreRequest},
    error::AppError,
    routes::identity::JuryIdentity,
    services::scoring_service,
    state::SharedState,
};

/// Routes for the score ledger and the published standings.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/scores",
            get(list_scores)
                .post(submit_score)
                .put(replace_scores)
                .delete(clear_scores),
        )
        .route("/scores/jury/{jury_id}", delete(clear_jury_scores))
        .route("/standings", get(list_standings))
        .route("/scoreboard", get(scoreboard))
}

/// Raw score ledger, one row per `(team, contest, jury)` triple.
#[utoipa::path(
    get,
    path = "/scores",
    tag = "scores",
    responses((status = 200, description = "Current ledger", body = [ScoreRow]))
)]
pub async fn list_scores(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ScoreRow>>, AppError> {
    let rows = scoring_service::ledger(&state).await?;
    Ok(Json(rows))
}

/// Submit or replace one jury member's score for a team and contest.
#[utoipa::path(
    post,
    path = "/scores",
    tag = "scores",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = ScoreboardSnapshot),
        (status = 423, description = "Scores are locked by the organizer")
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    identity: JuryIdentity,
    Valid(Json(payload)): Valid<Json<SubmitScoreRequest>>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    if payload.jury_id != identity.0 {
        return Err(AppError::Unauthorized(
            "submitting on behalf of another jury member".into(),
        ));
    }
    let snapshot = scoring_service::submit_score(&state, payload).await?;
    Ok(Json(snapshot))
}

/// Replace the whole ledger in one request.
#[utoipa::path(
    put,
    path = "/scores",
    tag = "scores",
    request_body = [SubmitScoreRequest],
    responses(
        (status = 200, description = "Ledger replaced", body = ScoreboardSnapshot),
        (status = 423, description = "Scores are locked by the organizer")
    )
)]
pub async fn replace_scores(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Json(payload): Json<Vec<SubmitScoreRequest>>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let snapshot = scoring_service::replace_scores(&state, payload).await?;
    Ok(Json(snapshot))
}

/// Drop every ledger row and publish empty standings.
#[utoipa::path(
    delete,
    path = "/scores",
    tag = "scores",
    responses(
        (status = 200, description = "Ledger cleared", body = ScoreboardSnapshot),
        (status = 423, description = "Scores are locked by the organizer")
    )
)]
pub async fn clear_scores(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let snapshot = scoring_service::clear_all_scores(&state).await?;
    Ok(Json(snapshot))
}

/// Remove one jury member's submissions, optionally scoped to a contest.
#[utoipa::path(
    delete,
    path = "/scores/jury/{jury_id}",
    tag = "scores",
    params(
        ("jury_id" = String, Path, description = "Jury member whose scores are removed"),
        ContestScopeQuery
    ),
    responses(
        (status = 200, description = "Jury scores removed", body = ScoreboardSnapshot),
        (status = 423, description = "Scores are locked by the organizer")
    )
)]
pub async fn clear_jury_scores(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Path(jury_id): Path<String>,
    Query(scope): Query<ContestScopeQuery>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let snapshot = scoring_service::clear_jury_scores(&state, jury_id, scope.contest_id).await?;
    Ok(Json(snapshot))
}

/// Published per-team, per-contest averages.
#[utoipa::path(
    get,
    path = "/standings",
    tag = "scores",
    responses((status = 200, description = "Current standings", body = [StandingRow]))
)]
pub async fn list_standings(
    State(state): State<SharedState>,
) -> Result<Json<Vec<StandingRow>>, AppError> {
    let rows = scoring_service::standings(&state).await?;
    Ok(Json(rows))
}

/// Teams, ledger, and standings in one response.
#[utoipa::path(
    get,
    path = "/scoreboard",
    tag = "scores",
    responses((status = 200, description = "Combined scoring view", body = ScoreboardSnapshot))
)]
pub async fn scoreboard(
    State(state): State<SharedState>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let snapshot = scoring_service::scoreboard(&state).await?;
    Ok(Json(snapshot))
}
