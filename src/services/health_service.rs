use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the scoring backend is fully operational.
///
/// Always answers, even without a store: a degraded response tells probes
/// the API is up while score persistence is not. Store ping failures are
/// logged here but surface through the degraded flag, which the supervisor
/// owns.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.require_score_store().await {
        Ok(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage health check failed");
            }
        }
        Err(_) => warn!("storage unavailable (degraded mode)"),
    }

    if state.is_degraded().await {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
