use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::dao::models::{
    AuditEntryEntity, JuryScoreEntity, LockStateEntity, ScoreEntity, SnapshotEntity,
    StandingEntity, TeamEntity,
};

/// Ledger row keyed by its `team:contest:jury` triple so independent judges
/// never contend on a shared document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoScoreDocument {
    #[serde(rename = "_id")]
    id: String,
    team_id: String,
    contest_id: String,
    jury_id: String,
    score: f64,
    details: Option<serde_json::Value>,
    submitted_at: DateTime,
}

impl From<ScoreEntity> for MongoScoreDocument {
    fn from(value: ScoreEntity) -> Self {
        Self {
            id: value.key().storage_key(),
            submitted_at: DateTime::from_system_time(value.submitted_at),
            team_id: value.team_id,
            contest_id: value.contest_id,
            jury_id: value.jury_id,
            score: value.score,
            details: value.details,
        }
    }
}

impl From<MongoScoreDocument> for ScoreEntity {
    fn from(value: MongoScoreDocument) -> Self {
        Self {
            team_id: value.team_id,
            contest_id: value.contest_id,
            jury_id: value.jury_id,
            score: value.score,
            details: value.details,
            submitted_at: value.submitted_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    members: Vec<String>,
    total_score: f64,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            members: value.members,
            total_score: value.total_score,
        }
    }
}

impl From<MongoTeamDocument> for TeamEntity {
    fn from(value: MongoTeamDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            members: value.members,
            total_score: value.total_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStandingRow {
    team_id: String,
    contest_id: String,
    average_score: f64,
    jury_scores: Vec<JuryScoreEntity>,
    computed_at: DateTime,
}

impl From<StandingEntity> for MongoStandingRow {
    fn from(value: StandingEntity) -> Self {
        Self {
            team_id: value.team_id,
            contest_id: value.contest_id,
            average_score: value.average_score,
            jury_scores: value.jury_scores,
            computed_at: DateTime::from_system_time(value.computed_at),
        }
    }
}

impl From<MongoStandingRow> for StandingEntity {
    fn from(value: MongoStandingRow) -> Self {
        Self {
            team_id: value.team_id,
            contest_id: value.contest_id,
            average_score: value.average_score,
            jury_scores: value.jury_scores,
            computed_at: value.computed_at.to_system_time(),
        }
    }
}

/// Singleton document holding the full published standings so the read model
/// is replaced in one atomic write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStandingsDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub entries: Vec<MongoStandingRow>,
}

impl MongoStandingsDocument {
    pub const SINGLETON_ID: &'static str = "standings";

    pub fn from_entities(standings: Vec<StandingEntity>) -> Self {
        Self {
            id: Self::SINGLETON_ID.to_owned(),
            entries: standings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn into_entities(self) -> Vec<StandingEntity> {
        self.entries.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoLockDocument {
    #[serde(rename = "_id")]
    pub id: String,
    locked: bool,
    locked_at: Option<DateTime>,
    locked_by: Option<String>,
}

impl MongoLockDocument {
    pub const SINGLETON_ID: &'static str = "scores-lock";
}

impl From<LockStateEntity> for MongoLockDocument {
    fn from(value: LockStateEntity) -> Self {
        Self {
            id: Self::SINGLETON_ID.to_owned(),
            locked: value.locked,
            locked_at: value.locked_at.map(DateTime::from_system_time),
            locked_by: value.locked_by,
        }
    }
}

impl From<MongoLockDocument> for LockStateEntity {
    fn from(value: MongoLockDocument) -> Self {
        Self {
            locked: value.locked,
            locked_at: value.locked_at.map(|at| at.to_system_time()),
            locked_by: value.locked_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoAuditDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    timestamp: DateTime,
    jury_id: String,
    jury_name: String,
    team_id: String,
    team_name: String,
    contest_id: String,
    previous_score: Option<f64>,
    new_score: f64,
}

impl From<AuditEntryEntity> for MongoAuditDocument {
    fn from(value: AuditEntryEntity) -> Self {
        Self {
            id: None,
            timestamp: DateTime::from_system_time(value.timestamp),
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

impl From<MongoAuditDocument> for AuditEntryEntity {
    fn from(value: MongoAuditDocument) -> Self {
        Self {
            timestamp: value.timestamp.to_system_time(),
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSnapshotDocument {
    #[serde(rename = "_id")]
    id: String,
    pub created_at: DateTime,
    teams: Vec<MongoTeamDocument>,
    scores: Vec<MongoScoreDocument>,
    standings: Vec<MongoStandingRow>,
}

impl MongoSnapshotDocument {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl From<SnapshotEntity> for MongoSnapshotDocument {
    fn from(value: SnapshotEntity) -> Self {
        Self {
            id: value.id,
            created_at: DateTime::from_system_time(value.created_at),
            teams: value.teams.into_iter().map(Into::into).collect(),
            scores: value.scores.into_iter().map(Into::into).collect(),
            standings: value.standings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<MongoSnapshotDocument> for SnapshotEntity {
    fn from(value: MongoSnapshotDocument) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at.to_system_time(),
            teams: value.teams.into_iter().map(Into::into).collect(),
            scores: value.scores.into_iter().map(Into::into).collect(),
            standings: value.standings.into_iter().map(Into::into).collect(),
        }
    }
}
