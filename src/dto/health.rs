use serde::Serialize;
use utoipa::ToSchema;

/// Payload of `/healthcheck`.
///
/// `degraded` means the API answers but score persistence is down, so
/// dashboards can warn judges before a submission bounces with a 503.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Either `ok` or `degraded`.
    pub status: String,
}

impl HealthResponse {
    /// Fully operational: store reachable, scores accepted.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// API up, score store unreachable.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
