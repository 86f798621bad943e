//! Backup and restore DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::SnapshotInfoEntity;
use crate::dto::format_system_time;

/// Handle to a stored snapshot, usable with the restore endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct BackupInfo {
    /// Snapshot identifier, sortable by creation time.
    pub id: String,
    /// RFC 3339 timestamp of when the snapshot was taken.
    pub created_at: String,
}

impl From<SnapshotInfoEntity> for BackupInfo {
    fn from(value: SnapshotInfoEntity) -> Self {
        Self {
            id: value.id,
            created_at: format_system_time(value.created_at),
        }
    }
}
