/// In-memory backend used by tests and storage-free deployments.
pub mod memory;
#[cfg(feature = "mongo-store")]
/// MongoDB-backed implementation of [`ScoreStore`].
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::models::{
    AuditEntryEntity, LockStateEntity, ScoreEntity, ScoreKey, SnapshotEntity, SnapshotInfoEntity,
    StandingEntity, TeamEntity,
};
use crate::dao::storage::StorageResult;

/// Most audit entries a backend retains; older entries are trimmed on append.
pub const MAX_AUDIT_ENTRIES: usize = 1_000;

/// Abstraction over the persistence layer for the scoring collections.
///
/// Every ledger row is addressed by its `(team, contest, jury)` triple so
/// unrelated writers never overwrite each other, and the standings collection
/// is always replaced wholesale, never patched.
pub trait ScoreStore: Send + Sync {
    /// Fetch a single ledger row by its identity triple.
    fn find_score(&self, key: ScoreKey) -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>>;
    /// Insert or replace the ledger row matching the entity's identity triple.
    fn save_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// List the whole raw score ledger.
    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>>;
    /// Replace the whole ledger with the provided rows.
    fn replace_scores(&self, scores: Vec<ScoreEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove every ledger row belonging to a team; returns the removed count.
    fn delete_scores_for_team(&self, team_id: String) -> BoxFuture<'static, StorageResult<u64>>;
    /// Remove a jury member's rows, optionally scoped to one contest.
    fn delete_scores_for_jury(
        &self,
        jury_id: String,
        contest_id: Option<String>,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Drop every ledger row.
    fn clear_scores(&self) -> BoxFuture<'static, StorageResult<()>>;

    /// List the team roster.
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Fetch a single team by id.
    fn find_team(&self, id: String) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// Insert or replace a team.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete a team; returns whether a team was actually removed.
    fn delete_team(&self, id: String) -> BoxFuture<'static, StorageResult<bool>>;
    /// Replace the whole roster with the provided teams.
    fn replace_teams(&self, teams: Vec<TeamEntity>) -> BoxFuture<'static, StorageResult<()>>;

    /// Load the last published standings.
    fn load_standings(&self) -> BoxFuture<'static, StorageResult<Vec<StandingEntity>>>;
    /// Atomically replace the published standings.
    fn replace_standings(
        &self,
        standings: Vec<StandingEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Load the persisted lock state, if one was ever written.
    fn load_lock(&self) -> BoxFuture<'static, StorageResult<Option<LockStateEntity>>>;
    /// Persist the lock state singleton.
    fn save_lock(&self, lock: LockStateEntity) -> BoxFuture<'static, StorageResult<()>>;

    /// Append an audit entry, trimming the log to [`MAX_AUDIT_ENTRIES`].
    fn append_audit(&self, entry: AuditEntryEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Return the most recent `limit` audit entries, newest first.
    fn list_audit(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<AuditEntryEntity>>>;

    /// Persist a snapshot under its creation-time identifier.
    fn save_snapshot(&self, snapshot: SnapshotEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a snapshot by identifier.
    fn find_snapshot(
        &self,
        id: String,
    ) -> BoxFuture<'static, StorageResult<Option<SnapshotEntity>>>;
    /// List stored snapshots, newest first.
    fn list_snapshots(&self) -> BoxFuture<'static, StorageResult<Vec<SnapshotInfoEntity>>>;

    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
