//! DTOs for score submission, the raw ledger, and the published standings.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dao::models::{JuryScoreEntity, ScoreEntity, StandingEntity};
use crate::dto::{format_system_time, teams::TeamRow, validation::validate_identity};

/// One raw score submitted by a jury member for a team in a contest round.
///
/// Resubmitting the same `(team_id, contest_id, jury_id)` triple replaces the
/// previous value instead of adding a second row.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    /// Team being scored.
    #[validate(custom(function = "validate_identity"))]
    pub team_id: String,
    /// Contest round the score belongs to.
    #[validate(custom(function = "validate_identity"))]
    pub contest_id: String,
    /// Jury member submitting the score.
    #[validate(custom(function = "validate_identity"))]
    pub jury_id: String,
    /// Total awarded by this jury member.
    pub score: f64,
    /// Opaque rubric payload kept alongside the total for the UI.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Optional contest scope for jury-wide score removal.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ContestScopeQuery {
    /// Restrict the operation to one contest round; absent means all rounds.
    #[serde(default)]
    pub contest_id: Option<String>,
}

/// Ledger row as served to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreRow {
    /// Team being scored.
    pub team_id: String,
    /// Contest round the score belongs to.
    pub contest_id: String,
    /// Jury member who submitted.
    pub jury_id: String,
    /// Total awarded by this jury member.
    pub score: f64,
    /// Opaque rubric payload, if the form provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// RFC 3339 timestamp of the latest (re)submission.
    pub submitted_at: String,
}

impl From<ScoreEntity> for ScoreRow {
    fn from(value: ScoreEntity) -> Self {
        Self {
            team_id: value.team_id,
            contest_id: value.contest_id,
            jury_id: value.jury_id,
            score: value.score,
            details: value.details,
            submitted_at: format_system_time(value.submitted_at),
        }
    }
}

/// Single jury contribution inside a standing.
#[derive(Debug, Serialize, ToSchema)]
pub struct JuryScore {
    /// Identifier of the contributing jury member.
    pub jury_id: String,
    /// Resolved display name.
    pub jury_name: String,
    /// Raw score given.
    pub score: f64,
}

impl From<JuryScoreEntity> for JuryScore {
    fn from(value: JuryScoreEntity) -> Self {
        Self {
            jury_id: value.jury_id,
            jury_name: value.jury_name,
            score: value.score,
        }
    }
}

/// Published standing for one `(team, contest)` pair.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingRow {
    /// Team the standing belongs to.
    pub team_id: String,
    /// Contest round the standing covers.
    pub contest_id: String,
    /// Mean of contributing jury scores, one decimal place.
    pub average_score: f64,
    /// How many judges have scored this pair so far; the average divides by
    /// this count, not by the full jury size.
    pub jury_count: usize,
    /// Per-jury breakdown.
    pub jury_scores: Vec<JuryScore>,
    /// RFC 3339 timestamp of the aggregation run that produced this row.
    pub computed_at: String,
}

impl From<StandingEntity> for StandingRow {
    fn from(value: StandingEntity) -> Self {
        Self {
            team_id: value.team_id,
            contest_id: value.contest_id,
            average_score: value.average_score,
            jury_count: value.jury_scores.len(),
            jury_scores: value.jury_scores.into_iter().map(Into::into).collect(),
            computed_at: format_system_time(value.computed_at),
        }
    }
}

/// Combined view of the live scoring collections, returned after every
/// successful mutation so clients refresh in one round trip.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardSnapshot {
    /// Team roster.
    pub teams: Vec<TeamRow>,
    /// Raw score ledger.
    pub scores: Vec<ScoreRow>,
    /// Published standings.
    pub standings: Vec<StandingRow>,
}
