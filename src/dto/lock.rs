//! Lock gate DTOs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::dao::models::LockStateEntity;
use crate::dto::format_system_time;

/// Current state of the global score freeze.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
pub struct LockStatus {
    /// Whether mutating score operations are currently rejected.
    pub locked: bool,
    /// RFC 3339 timestamp of when the freeze was engaged.
    pub locked_at: Option<String>,
    /// Identity of the actor who engaged the freeze.
    pub locked_by: Option<String>,
}

impl From<LockStateEntity> for LockStatus {
    fn from(value: LockStateEntity) -> Self {
        Self {
            locked: value.locked,
            locked_at: value.locked_at.map(format_system_time),
            locked_by: value.locked_by,
        }
    }
}

/// Request to engage or release the global score freeze.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLockRequest {
    /// Desired freeze state.
    pub locked: bool,
}
