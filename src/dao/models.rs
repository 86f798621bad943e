use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Representation of a competing team stored in persistence and shared across layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamEntity {
    /// Stable identifier for the team, treated as opaque by the scoring core.
    pub id: String,
    /// Display name chosen for the team.
    pub name: String,
    /// Ordered list of member names.
    pub members: Vec<String>,
    /// Running total maintained by the roster UI; the core never recomputes it.
    pub total_score: f64,
}

/// Three-part identity of a ledger row. At most one raw score exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    /// Team being scored.
    pub team_id: String,
    /// Contest round the score belongs to.
    pub contest_id: String,
    /// Jury member who submitted the score.
    pub jury_id: String,
}

impl ScoreKey {
    /// Render the key in its canonical `team:contest:jury` storage form.
    pub fn storage_key(&self) -> String {
        format!("{}:{}:{}", self.team_id, self.contest_id, self.jury_id)
    }
}

/// Raw per-jury score as submitted, one row per `(team, contest, jury)` triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntity {
    /// Team being scored.
    pub team_id: String,
    /// Contest round the score belongs to.
    pub contest_id: String,
    /// Jury member who submitted the score.
    pub jury_id: String,
    /// Total awarded by this jury member for this contest.
    pub score: f64,
    /// Opaque rubric payload forwarded by the scoring forms.
    pub details: Option<serde_json::Value>,
    /// When the submission (or latest resubmission) happened.
    pub submitted_at: SystemTime,
}

impl ScoreEntity {
    /// Identity triple of this ledger row.
    pub fn key(&self) -> ScoreKey {
        ScoreKey {
            team_id: self.team_id.clone(),
            contest_id: self.contest_id.clone(),
            jury_id: self.jury_id.clone(),
        }
    }
}

/// Single jury contribution inside an aggregated standing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JuryScoreEntity {
    /// Identifier of the contributing jury member.
    pub jury_id: String,
    /// Resolved display name, or the unknown-jury sentinel.
    pub jury_name: String,
    /// Raw score this jury member gave.
    pub score: f64,
}

/// Derived standing for one `(team, contest)` pair, fully rebuilt on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingEntity {
    /// Team the standing belongs to.
    pub team_id: String,
    /// Contest round the standing covers.
    pub contest_id: String,
    /// Mean of all contributing jury scores, rounded to one decimal place.
    pub average_score: f64,
    /// Per-jury breakdown; its length tells callers how many judges contributed.
    pub jury_scores: Vec<JuryScoreEntity>,
    /// When the aggregation engine produced this row.
    pub computed_at: SystemTime,
}

/// Persisted singleton describing the global score freeze.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LockStateEntity {
    /// Whether mutating score operations are currently rejected.
    pub locked: bool,
    /// When the freeze was engaged, if it is.
    pub locked_at: Option<SystemTime>,
    /// Identity of the actor who engaged the freeze, if it is.
    pub locked_by: Option<String>,
}

impl LockStateEntity {
    /// State representing an open gate with no freeze metadata.
    pub fn unlocked() -> Self {
        Self {
            locked: false,
            locked_at: None,
            locked_by: None,
        }
    }
}

/// Append-only record of one successful score upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntryEntity {
    /// When the upsert happened.
    pub timestamp: SystemTime,
    /// Jury member who submitted.
    pub jury_id: String,
    /// Resolved jury display name at submission time.
    pub jury_name: String,
    /// Team that was scored.
    pub team_id: String,
    /// Team display name at submission time.
    pub team_name: String,
    /// Contest round the score belongs to.
    pub contest_id: String,
    /// Score being replaced; `None` the first time the triple is written.
    pub previous_score: Option<f64>,
    /// Score now on record.
    pub new_score: f64,
}

/// Full point-in-time copy of the live scoring collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotEntity {
    /// Creation-time identifier (RFC 3339), sortable by creation order.
    pub id: String,
    /// When the snapshot was taken.
    pub created_at: SystemTime,
    /// Team roster at snapshot time.
    pub teams: Vec<TeamEntity>,
    /// Raw score ledger at snapshot time.
    pub scores: Vec<ScoreEntity>,
    /// Published standings at snapshot time.
    pub standings: Vec<StandingEntity>,
}

/// Listing projection of a stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotInfoEntity {
    /// Snapshot identifier usable with restore.
    pub id: String,
    /// When the snapshot was taken.
    pub created_at: SystemTime,
}
