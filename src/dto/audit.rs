//! Audit log DTOs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};

use crate::dao::models::AuditEntryEntity;
use crate::dto::format_system_time;

/// Query parameters for the audit log listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQuery {
    /// Maximum number of entries to return (default 100, capped at 500).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One score change as recorded in the audit log.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditRow {
    /// RFC 3339 timestamp of the change.
    pub timestamp: String,
    /// Jury member who submitted.
    pub jury_id: String,
    /// Jury display name at submission time.
    pub jury_name: String,
    /// Team that was scored.
    pub team_id: String,
    /// Team display name at submission time.
    pub team_name: String,
    /// Contest round the score belongs to.
    pub contest_id: String,
    /// Score that was replaced; absent on the first submission of a triple.
    pub previous_score: Option<f64>,
    /// Score now on record.
    pub new_score: f64,
}

impl From<AuditEntryEntity> for AuditRow {
    fn from(value: AuditEntryEntity) -> Self {
        Self {
            timestamp: format_system_time(value.timestamp),
            jury_id: value.jury_id,
            jury_name: value.jury_name,
            team_id: value.team_id,
            team_name: value.team_name,
            contest_id: value.contest_id,
            previous_score: value.previous_score,
            new_score: value.new_score,
        }
    }
}
