use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use indexmap::IndexMap;

use crate::dao::models::{
    AuditEntryEntity, LockStateEntity, ScoreEntity, ScoreKey, SnapshotEntity, SnapshotInfoEntity,
    StandingEntity, TeamEntity,
};
use crate::dao::score_store::{MAX_AUDIT_ENTRIES, ScoreStore};
use crate::dao::storage::StorageResult;

/// In-process [`ScoreStore`] keeping every collection behind one mutex.
///
/// Serves two purposes: deterministic storage for the service tests and a
/// storage-free deployment mode (`STORE_BACKEND=memory`). Insertion order of
/// ledger rows and teams is preserved so reads have stable ordering.
#[derive(Clone, Default)]
pub struct MemoryScoreStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    scores: IndexMap<ScoreKey, ScoreEntity>,
    teams: IndexMap<String, TeamEntity>,
    standings: Vec<StandingEntity>,
    lock: Option<LockStateEntity>,
    audit: Vec<AuditEntryEntity>,
    snapshots: BTreeMap<String, SnapshotEntity>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut MemoryInner) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl ScoreStore for MemoryScoreStore {
    fn find_score(&self, key: ScoreKey) -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.scores.get(&key).cloned())) })
    }

    fn save_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.scores.insert(score.key(), score);
            });
            Ok(())
        })
    }

    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| inner.scores.values().cloned().collect()))
        })
    }

    fn replace_scores(&self, scores: Vec<ScoreEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.scores = scores
                    .into_iter()
                    .map(|score| (score.key(), score))
                    .collect();
            });
            Ok(())
        })
    }

    fn delete_scores_for_team(&self, team_id: String) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| {
                let before = inner.scores.len();
                inner.scores.retain(|key, _| key.team_id != team_id);
                (before - inner.scores.len()) as u64
            }))
        })
    }

    fn delete_scores_for_jury(
        &self,
        jury_id: String,
        contest_id: Option<String>,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| {
                let before = inner.scores.len();
                inner.scores.retain(|key, _| {
                    key.jury_id != jury_id
                        || contest_id
                            .as_ref()
                            .is_some_and(|contest| key.contest_id != *contest)
                });
                (before - inner.scores.len()) as u64
            }))
        })
    }

    fn clear_scores(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| inner.scores.clear());
            Ok(())
        })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.teams.values().cloned().collect())) })
    }

    fn find_team(&self, id: String) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.teams.get(&id).cloned())) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.teams.insert(team.id.clone(), team);
            });
            Ok(())
        })
    }

    fn delete_team(&self, id: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| inner.teams.shift_remove(&id).is_some()))
        })
    }

    fn replace_teams(&self, teams: Vec<TeamEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.teams = teams.into_iter().map(|team| (team.id.clone(), team)).collect();
            });
            Ok(())
        })
    }

    fn load_standings(&self) -> BoxFuture<'static, StorageResult<Vec<StandingEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.standings.clone())) })
    }

    fn replace_standings(
        &self,
        standings: Vec<StandingEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| inner.standings = standings);
            Ok(())
        })
    }

    fn load_lock(&self) -> BoxFuture<'static, StorageResult<Option<LockStateEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.lock.clone())) })
    }

    fn save_lock(&self, lock: LockStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| inner.lock = Some(lock));
            Ok(())
        })
    }

    fn append_audit(&self, entry: AuditEntryEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.audit.push(entry);
                if inner.audit.len() > MAX_AUDIT_ENTRIES {
                    let excess = inner.audit.len() - MAX_AUDIT_ENTRIES;
                    inner.audit.drain(..excess);
                }
            });
            Ok(())
        })
    }

    fn list_audit(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<AuditEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| {
                inner.audit.iter().rev().take(limit).cloned().collect()
            }))
        })
    }

    fn save_snapshot(&self, snapshot: SnapshotEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_inner(|inner| {
                inner.snapshots.insert(snapshot.id.clone(), snapshot);
            });
            Ok(())
        })
    }

    fn find_snapshot(
        &self,
        id: String,
    ) -> BoxFuture<'static, StorageResult<Option<SnapshotEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.with_inner(|inner| inner.snapshots.get(&id).cloned())) })
    }

    fn list_snapshots(&self) -> BoxFuture<'static, StorageResult<Vec<SnapshotInfoEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store.with_inner(|inner| {
                // RFC 3339 ids sort by creation time, so reverse order is newest first.
                inner
                    .snapshots
                    .values()
                    .rev()
                    .map(|snapshot| SnapshotInfoEntity {
                        id: snapshot.id.clone(),
                        created_at: snapshot.created_at,
                    })
                    .collect()
            }))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn audit_entry(n: usize) -> AuditEntryEntity {
        AuditEntryEntity {
            timestamp: SystemTime::now(),
            jury_id: "1".into(),
            jury_name: format!("Jury member {n}"),
            team_id: "t1".into(),
            team_name: "Team Alpha".into(),
            contest_id: "visit-card".into(),
            previous_score: None,
            new_score: n as f64,
        }
    }

    #[tokio::test]
    async fn audit_append_trims_the_oldest_entries_past_the_cap() {
        let store = MemoryScoreStore::new();

        for n in 0..(MAX_AUDIT_ENTRIES + 5) {
            store.append_audit(audit_entry(n)).await.expect("append");
        }

        let newest = store.list_audit(MAX_AUDIT_ENTRIES * 2).await.expect("list");
        assert_eq!(newest.len(), MAX_AUDIT_ENTRIES);
        // Newest first, and the five oldest entries are gone.
        assert_eq!(newest[0].new_score, (MAX_AUDIT_ENTRIES + 4) as f64);
        assert_eq!(
            newest.last().map(|entry| entry.new_score),
            Some(5.0)
        );
    }
}
