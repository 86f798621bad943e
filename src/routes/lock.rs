use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::lock::{LockStatus, SetLockRequest},
    error::AppError,
    routes::identity::JuryIdentity,
    services::lock_service,
    state::SharedState,
};

/// Routes exposing the global score freeze.
pub fn router() -> Router<SharedState> {
    Router::new().route("/lock", get(lock_status).put(set_lock))
}

/// Current freeze state.
#[utoipa::path(
    get,
    path = "/lock",
    tag = "lock",
    responses((status = 200, description = "Current lock state", body = LockStatus))
)]
pub async fn lock_status(State(state): State<SharedState>) -> Result<Json<LockStatus>, AppError> {
    let status = lock_service::status(&state).await?;
    Ok(Json(status))
}

/// Engage or release the freeze; the caller's identity is recorded.
#[utoipa::path(
    put,
    path = "/lock",
    tag = "lock",
    request_body = SetLockRequest,
    responses((status = 200, description = "Lock state updated", body = LockStatus))
)]
pub async fn set_lock(
    State(state): State<SharedState>,
    identity: JuryIdentity,
    Json(payload): Json<SetLockRequest>,
) -> Result<Json<LockStatus>, AppError> {
    let status = lock_service::set_locked(&state, payload.locked, &identity.0).await?;
    Ok(Json(status))
}
