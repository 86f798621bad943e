use mongodb::error::Error as MongoError;
use thiserror::Error;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failure modes of the MongoDB score store, one variant per operation family.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to save score `{key}`")]
    SaveScore {
        key: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to load scores")]
    LoadScores {
        #[source]
        source: MongoError,
    },
    #[error("failed to delete scores")]
    DeleteScores {
        #[source]
        source: MongoError,
    },
    #[error("failed to save team `{id}`")]
    SaveTeam {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to load teams")]
    LoadTeams {
        #[source]
        source: MongoError,
    },
    #[error("failed to delete team `{id}`")]
    DeleteTeam {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to save standings")]
    SaveStandings {
        #[source]
        source: MongoError,
    },
    #[error("failed to load standings")]
    LoadStandings {
        #[source]
        source: MongoError,
    },
    #[error("failed to save lock state")]
    SaveLock {
        #[source]
        source: MongoError,
    },
    #[error("failed to load lock state")]
    LoadLock {
        #[source]
        source: MongoError,
    },
    #[error("failed to append audit entry")]
    AppendAudit {
        #[source]
        source: MongoError,
    },
    #[error("failed to load audit log")]
    LoadAudit {
        #[source]
        source: MongoError,
    },
    #[error("failed to save snapshot `{id}`")]
    SaveSnapshot {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to load snapshot `{id}`")]
    LoadSnapshot {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to list snapshots")]
    ListSnapshots {
        #[source]
        source: MongoError,
    },
    #[error("environment variable `{var}` is not set")]
    MissingEnvVar { var: &'static str },
}
