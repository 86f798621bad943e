//! Read-only projection of the runtime configuration for scoring clients.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::AppConfig;

/// Jury roster entry as served to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct JuryMemberInfo {
    /// Opaque identity used when submitting scores.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Contest universe and jury roster the server aggregates over.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    /// Fixed set of contest identifiers.
    pub contests: Vec<String>,
    /// Configured jury roster.
    pub jury: Vec<JuryMemberInfo>,
}

impl From<&AppConfig> for ConfigResponse {
    fn from(config: &AppConfig) -> Self {
        Self {
            contests: config.contests().to_vec(),
            jury: config
                .jury()
                .iter()
                .map(|member| JuryMemberInfo {
                    id: member.id.clone(),
                    name: member.name.clone(),
                })
                .collect(),
        }
    }
}
