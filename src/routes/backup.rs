use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{backup::BackupInfo, scores::ScoreboardSnapshot},
    error::AppError,
    routes::identity::JuryIdentity,
    services::backup_service,
    state::SharedState,
};

/// Routes for snapshot and restore of the scoreboard.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/backups", get(list_backups).post(create_backup))
        .route("/backups/{id}/restore", post(restore_backup))
}

/// Stored snapshots, newest first.
#[utoipa::path(
    get,
    path = "/backups",
    tag = "backups",
    responses((status = 200, description = "Stored snapshots", body = [BackupInfo]))
)]
pub async fn list_backups(
    State(state): State<SharedState>,
) -> Result<Json<Vec<BackupInfo>>, AppError> {
    let rows = backup_service::list_backups(&state).await?;
    Ok(Json(rows))
}

/// Capture the current roster, ledger, and standings.
#[utoipa::path(
    post,
    path = "/backups",
    tag = "backups",
    responses((status = 200, description = "Snapshot created", body = BackupInfo))
)]
pub async fn create_backup(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
) -> Result<Json<BackupInfo>, AppError> {
    let info = backup_service::create_backup(&state).await?;
    Ok(Json(info))
}

/// Replace the live board with a stored snapshot.
#[utoipa::path(
    post,
    path = "/backups/{id}/restore",
    tag = "backups",
    params(("id" = String, Path, description = "Identifier of the snapshot to restore")),
    responses(
        (status = 200, description = "Snapshot restored", body = ScoreboardSnapshot),
        (status = 404, description = "Snapshot not found"),
        (status = 423, description = "Scores are locked by the organizer")
    )
)]
pub async fn restore_backup(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Path(id): Path<String>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let snapshot = backup_service::restore_backup(&state, id).await?;
    Ok(Json(snapshot))
}
