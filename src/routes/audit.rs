use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::audit::{AuditQuery, AuditRow},
    error::AppError,
    routes::identity::JuryIdentity,
    services::audit_service,
    state::SharedState,
};

/// Routes exposing the audit log.
pub fn router() -> Router<SharedState> {
    Router::new().route("/audit", get(list_audit))
}

/// Most recent score changes, newest first.
#[utoipa::path(
    get,
    path = "/audit",
    tag = "audit",
    params(AuditQuery),
    responses((status = 200, description = "Recent score changes", body = [AuditRow]))
)]
pub async fn list_audit(
    State(state): State<SharedState>,
    _identity: JuryIdentity,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditRow>>, AppError> {
    let rows = audit_service::query(&state, query.limit).await?;
    Ok(Json(rows))
}
