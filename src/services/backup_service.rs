//! Snapshot and restore of the whole scoreboard.
//!
//! A snapshot captures the roster, the ledger, and the published standings
//! together; restoring swaps all three back in one pass under the write gate
//! so readers never observe a half-restored board. The audit log and the
//! lock flag are deliberately outside the snapshot.

use std::time::SystemTime;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::info;

use crate::{
    dao::models::{SnapshotEntity, SnapshotInfoEntity},
    dto::{backup::BackupInfo, scores::ScoreboardSnapshot},
    error::ServiceError,
    services::scoring_service::{build_scoreboard, ensure_unlocked},
    state::SharedState,
};

/// Capture the current board under a creation-time identifier.
pub async fn create_backup(state: &SharedState) -> Result<BackupInfo, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    let created_at = SystemTime::now();
    let id = OffsetDateTime::from(created_at)
        .format(&Rfc3339)
        .map_err(|err| ServiceError::InvalidInput(format!("timestamp formatting: {err}")))?;

    let snapshot = SnapshotEntity {
        id: id.clone(),
        created_at,
        teams: store.list_teams().await?,
        scores: store.list_scores().await?,
        standings: store.load_standings().await?,
    };
    let info = SnapshotInfoEntity {
        id: snapshot.id.clone(),
        created_at: snapshot.created_at,
    };
    store.save_snapshot(snapshot).await?;

    info!(backup_id = %id, "backup created");
    Ok(info.into())
}

/// Stored snapshots, newest first.
pub async fn list_backups(state: &SharedState) -> Result<Vec<BackupInfo>, ServiceError> {
    let store = state.require_score_store().await?;
    let snapshots = store.list_snapshots().await?;
    Ok(snapshots.into_iter().map(Into::into).collect())
}

/// Replace the live board with a stored snapshot.
///
/// Passes the same freeze gate as score mutations. The snapshot itself stays
/// in the store and can be restored again.
pub async fn restore_backup(
    state: &SharedState,
    id: String,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    ensure_unlocked(&store).await?;
    let snapshot = store
        .find_snapshot(id.clone())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("backup `{id}` not found")))?;

    store.replace_teams(snapshot.teams).await?;
    store.replace_scores(snapshot.scores).await?;
    store.replace_standings(snapshot.standings).await?;

    info!(backup_id = %id, "backup restored");
    build_scoreboard(&store).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{models::TeamEntity, score_store::memory::MemoryScoreStore},
        dto::scores::SubmitScoreRequest,
        services::{audit_service, lock_service, scoring_service},
        state::{AppState, SharedState},
    };

    async fn test_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;
        let store = state.score_store().await.expect("store installed");
        store
            .save_team(TeamEntity {
                id: "t1".into(),
                name: "Team Alpha".into(),
                members: vec![],
                total_score: 0.0,
            })
            .await
            .expect("seed team");
        state
    }

    fn submission(score: f64) -> SubmitScoreRequest {
        SubmitScoreRequest {
            team_id: "t1".into(),
            contest_id: "visit-card".into(),
            jury_id: "1".into(),
            score,
            details: None,
        }
    }

    #[tokio::test]
    async fn restore_rolls_the_board_back_but_keeps_the_audit_log() {
        let state = test_state().await;

        scoring_service::submit_score(&state, submission(5.0))
            .await
            .expect("submission");
        let backup = create_backup(&state).await.expect("backup");

        scoring_service::submit_score(&state, submission(9.0))
            .await
            .expect("overwrite");

        let restored = restore_backup(&state, backup.id).await.expect("restore");
        assert_eq!(restored.scores.len(), 1);
        assert_eq!(restored.scores[0].score, 5.0);
        assert_eq!(restored.standings[0].average_score, 5.0);

        // Both submissions stay on record.
        let log = audit_service::query(&state, None).await.expect("audit");
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn restore_is_rejected_while_locked_and_for_unknown_ids() {
        let state = test_state().await;
        let backup = create_backup(&state).await.expect("backup");

        let missing = restore_backup(&state, "2020-01-01T00:00:00Z".into()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        lock_service::set_locked(&state, true, "organizer1")
            .await
            .expect("lock");
        let locked = restore_backup(&state, backup.id).await;
        assert!(matches!(locked, Err(ServiceError::Locked)));
    }

    #[tokio::test]
    async fn backups_list_newest_first() {
        let state = test_state().await;

        let store = state.score_store().await.expect("store installed");
        for id in ["2024-01-01T00:00:00Z", "2024-06-01T00:00:00Z"] {
            store
                .save_snapshot(SnapshotEntity {
                    id: id.into(),
                    created_at: SystemTime::now(),
                    teams: vec![],
                    scores: vec![],
                    standings: vec![],
                })
                .await
                .expect("snapshot");
        }

        let listed = list_backups(&state).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "2024-06-01T00:00:00Z");
        assert_eq!(listed[1].id, "2024-01-01T00:00:00Z");
    }
}
