//! Team roster DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::TeamEntity;
use crate::dto::validation::validate_identity;

/// Payload for creating or updating a team.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeamInput {
    /// Stable identifier; generated server-side when omitted on creation.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name for the team.
    #[validate(custom(function = "validate_identity"))]
    pub name: String,
    /// Ordered list of member names.
    #[serde(default)]
    pub members: Vec<String>,
    /// Running total maintained by the roster UI.
    #[serde(default)]
    pub total_score: f64,
}

/// Team as served to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamRow {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ordered list of member names.
    pub members: Vec<String>,
    /// Running total maintained by the roster UI.
    pub total_score: f64,
}

impl From<TeamEntity> for TeamRow {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            members: value.members,
            total_score: value.total_score,
        }
    }
}
