//! Business logic for the score ledger: lock-gated upserts, bulk replacement,
//! clears, and the read models derived from them.
//!
//! Every mutating path runs under the shared write gate so the
//! read-modify-write sequence (lock check, ledger write, standings recompute,
//! audit append) never interleaves between concurrent requests.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::info;

use crate::{
    config::{AppConfig, UNKNOWN_JURY_LABEL},
    dao::{
        models::{AuditEntryEntity, ScoreEntity},
        score_store::ScoreStore,
    },
    dto::scores::{ScoreRow, ScoreboardSnapshot, StandingRow, SubmitScoreRequest},
    error::ServiceError,
    services::aggregation,
    state::SharedState,
};

/// Upsert one jury member's score for a `(team, contest)` pair.
///
/// Replaces any previous submission by the same jury member in place, then
/// recomputes the standings and records the change in the audit log. Rejected
/// with [`ServiceError::Locked`] while the organizer freeze is engaged.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    ensure_unlocked(&store).await?;
    let entry = validate_submission(state.config(), request)?;

    let team = store
        .find_team(entry.team_id.clone())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{}` not found", entry.team_id)))?;

    let key = entry.key();
    let previous_score = store.find_score(key.clone()).await?.map(|row| row.score);

    store.save_score(entry.clone()).await?;
    recompute_and_publish(&store, state.config()).await?;

    let jury_name = state
        .config()
        .jury_name(&entry.jury_id)
        .unwrap_or(UNKNOWN_JURY_LABEL)
        .to_owned();
    store
        .append_audit(AuditEntryEntity {
            timestamp: entry.submitted_at,
            jury_id: entry.jury_id.clone(),
            jury_name,
            team_id: entry.team_id.clone(),
            team_name: team.name,
            contest_id: entry.contest_id.clone(),
            previous_score,
            new_score: entry.score,
        })
        .await?;

    info!(
        team_id = %key.team_id,
        contest_id = %key.contest_id,
        jury_id = %key.jury_id,
        score = entry.score,
        resubmission = previous_score.is_some(),
        "score recorded"
    );

    build_scoreboard(&store).await
}

/// Replace the whole ledger with the provided rows.
///
/// Compatibility path for clients that sync their full score table; it passes
/// the same lock gate as per-entry submission, and changes flowing through it
/// are not individually audited.
pub async fn replace_scores(
    state: &SharedState,
    rows: Vec<SubmitScoreRequest>,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    ensure_unlocked(&store).await?;
    let entries = rows
        .into_iter()
        .map(|row| validate_submission(state.config(), row))
        .collect::<Result<Vec<_>, _>>()?;

    let count = entries.len();
    store.replace_scores(entries).await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(count, "score ledger replaced");
    build_scoreboard(&store).await
}

/// Remove a jury member's submissions, optionally scoped to one contest.
pub async fn clear_jury_scores(
    state: &SharedState,
    jury_id: String,
    contest_id: Option<String>,
) -> Result<ScoreboardSnapshot, ServiceError> {
    require_identity(&jury_id, "jury_id")?;

    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    ensure_unlocked(&store).await?;
    let removed = store
        .delete_scores_for_jury(jury_id.clone(), contest_id.clone())
        .await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(%jury_id, ?contest_id, removed, "jury scores cleared");
    build_scoreboard(&store).await
}

/// Drop every ledger row and publish empty standings.
pub async fn clear_all_scores(state: &SharedState) -> Result<ScoreboardSnapshot, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    ensure_unlocked(&store).await?;
    store.clear_scores().await?;
    recompute_and_publish(&store, state.config()).await?;

    info!("all scores cleared");
    build_scoreboard(&store).await
}

/// The raw score ledger.
pub async fn ledger(state: &SharedState) -> Result<Vec<ScoreRow>, ServiceError> {
    let store = state.require_score_store().await?;
    let scores = store.list_scores().await?;
    Ok(scores.into_iter().map(Into::into).collect())
}

/// The last published standings.
pub async fn standings(state: &SharedState) -> Result<Vec<StandingRow>, ServiceError> {
    let store = state.require_score_store().await?;
    let standings = store.load_standings().await?;
    Ok(standings.into_iter().map(Into::into).collect())
}

/// Combined view of teams, ledger, and standings.
pub async fn scoreboard(state: &SharedState) -> Result<ScoreboardSnapshot, ServiceError> {
    let store = state.require_score_store().await?;
    build_scoreboard(&store).await
}

/// Fail with [`ServiceError::Locked`] when the freeze is engaged.
pub(crate) async fn ensure_unlocked(store: &Arc<dyn ScoreStore>) -> Result<(), ServiceError> {
    let locked = store
        .load_lock()
        .await?
        .map(|lock| lock.locked)
        .unwrap_or(false);
    if locked {
        return Err(ServiceError::Locked);
    }
    Ok(())
}

/// Rebuild the standings from the current roster and ledger and swap them in.
pub(crate) async fn recompute_and_publish(
    store: &Arc<dyn ScoreStore>,
    config: &AppConfig,
) -> Result<(), ServiceError> {
    let teams = store.list_teams().await?;
    let scores = store.list_scores().await?;
    let standings = aggregation::recompute(&teams, &scores, config.contests(), config.jury());
    store.replace_standings(standings).await?;
    Ok(())
}

/// Assemble the combined read model served back after mutations.
pub(crate) async fn build_scoreboard(
    store: &Arc<dyn ScoreStore>,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let teams = store.list_teams().await?;
    let scores = store.list_scores().await?;
    let standings = store.load_standings().await?;
    Ok(ScoreboardSnapshot {
        teams: teams.into_iter().map(Into::into).collect(),
        scores: scores.into_iter().map(Into::into).collect(),
        standings: standings.into_iter().map(Into::into).collect(),
    })
}

pub(crate) fn require_identity(value: &str, field: &'static str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "`{field}` must not be empty"
        )));
    }
    Ok(())
}

fn validate_submission(
    config: &AppConfig,
    request: SubmitScoreRequest,
) -> Result<ScoreEntity, ServiceError> {
    require_identity(&request.team_id, "team_id")?;
    require_identity(&request.contest_id, "contest_id")?;
    require_identity(&request.jury_id, "jury_id")?;

    if !config.is_known_contest(&request.contest_id) {
        return Err(ServiceError::InvalidInput(format!(
            "unknown contest `{}`",
            request.contest_id
        )));
    }

    if !request.score.is_finite() {
        return Err(ServiceError::InvalidInput(
            "score must be a finite number".into(),
        ));
    }

    Ok(ScoreEntity {
        team_id: request.team_id,
        contest_id: request.contest_id,
        jury_id: request.jury_id,
        score: request.score,
        details: request.details,
        submitted_at: SystemTime::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::{models::TeamEntity, score_store::memory::MemoryScoreStore},
        services::{audit_service, lock_service},
        state::AppState,
    };

    async fn test_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;

        let store = state.score_store().await.expect("store installed");
        for (id, name) in [("t1", "Team Alpha"), ("t2", "Team Beta")] {
            store
                .save_team(TeamEntity {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    members: vec!["One".into(), "Two".into()],
                    total_score: 0.0,
                })
                .await
                .expect("seed team");
        }
        state
    }

    fn submission(team: &str, contest: &str, jury: &str, score: f64) -> SubmitScoreRequest {
        SubmitScoreRequest {
            team_id: team.to_owned(),
            contest_id: contest.to_owned(),
            jury_id: jury.to_owned(),
            score,
            details: None,
        }
    }

    #[tokio::test]
    async fn resubmission_replaces_the_row_and_audits_the_previous_value() {
        let state = test_state().await;

        submit_score(&state, submission("t1", "visit-card", "1", 5.0))
            .await
            .expect("first submission");
        let snapshot = submit_score(&state, submission("t1", "visit-card", "1", 7.0))
            .await
            .expect("resubmission");

        assert_eq!(snapshot.scores.len(), 1);
        assert_eq!(snapshot.scores[0].score, 7.0);

        let log = audit_service::query(&state, None).await.expect("audit");
        assert_eq!(log.len(), 2);
        // Newest first: the resubmission carries the replaced value.
        assert_eq!(log[0].previous_score, Some(5.0));
        assert_eq!(log[0].new_score, 7.0);
        assert_eq!(log[1].previous_score, None);
        assert_eq!(log[1].new_score, 5.0);
        assert_eq!(log[0].team_name, "Team Alpha");
    }

    #[tokio::test]
    async fn standings_average_all_contributing_judges() {
        let state = test_state().await;

        for (jury, score) in [("1", 6.0), ("2", 5.0), ("3", 7.0)] {
            submit_score(&state, submission("t1", "visit-card", jury, score))
                .await
                .expect("submission");
        }

        let rows = standings(&state).await.expect("standings");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].average_score, 6.0);
        assert_eq!(rows[0].jury_count, 3);
    }

    #[tokio::test]
    async fn partial_scoring_reports_the_single_judge_raw() {
        let state = test_state().await;

        submit_score(&state, submission("t2", "clinical-case", "1", 4.0))
            .await
            .expect("submission");

        let rows = standings(&state).await.expect("standings");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].average_score, 4.0);
        assert_eq!(rows[0].jury_count, 1);
    }

    #[tokio::test]
    async fn averages_round_to_one_decimal() {
        let state = test_state().await;

        for (jury, score) in [("1", 5.0), ("2", 5.0), ("3", 6.0)] {
            submit_score(&state, submission("t1", "mind-battle", jury, score))
                .await
                .expect("submission");
        }

        let rows = standings(&state).await.expect("standings");
        assert_eq!(rows[0].average_score, 5.3);
    }

    #[tokio::test]
    async fn locked_gate_rejects_every_mutation_and_leaves_state_untouched() {
        let state = test_state().await;

        submit_score(&state, submission("t1", "visit-card", "1", 5.0))
            .await
            .expect("submission before lock");
        let before_scores = ledger(&state).await.expect("ledger");
        let before_standings = standings(&state).await.expect("standings");

        lock_service::set_locked(&state, true, "organizer1")
            .await
            .expect("lock");

        let submit = submit_score(&state, submission("t1", "visit-card", "2", 6.0)).await;
        assert!(matches!(submit, Err(ServiceError::Locked)));
        let clear = clear_jury_scores(&state, "1".into(), None).await;
        assert!(matches!(clear, Err(ServiceError::Locked)));
        let bulk = replace_scores(&state, vec![]).await;
        assert!(matches!(bulk, Err(ServiceError::Locked)));
        let wipe = clear_all_scores(&state).await;
        assert!(matches!(wipe, Err(ServiceError::Locked)));

        // Reads keep working and nothing changed underneath them.
        let after_scores = ledger(&state).await.expect("ledger after lock");
        let after_standings = standings(&state).await.expect("standings after lock");
        assert_eq!(after_scores.len(), before_scores.len());
        assert_eq!(after_scores[0].score, before_scores[0].score);
        assert_eq!(
            after_standings[0].average_score,
            before_standings[0].average_score
        );
        assert!(
            audit_service::query(&state, None)
                .await
                .expect("audit readable while locked")
                .len()
                == 1
        );
    }

    #[tokio::test]
    async fn clearing_a_jury_scoped_to_one_contest_keeps_other_rows() {
        let state = test_state().await;

        submit_score(&state, submission("t1", "visit-card", "1", 5.0))
            .await
            .expect("submission");
        submit_score(&state, submission("t1", "mind-battle", "1", 2.0))
            .await
            .expect("submission");
        submit_score(&state, submission("t1", "visit-card", "2", 6.0))
            .await
            .expect("submission");

        let snapshot = clear_jury_scores(&state, "1".into(), Some("visit-card".into()))
            .await
            .expect("clear");

        assert_eq!(snapshot.scores.len(), 2);
        assert!(
            snapshot
                .scores
                .iter()
                .all(|row| !(row.jury_id == "1" && row.contest_id == "visit-card"))
        );
    }

    #[tokio::test]
    async fn clearing_all_scores_empties_the_ledger_and_the_standings() {
        let state = test_state().await;

        submit_score(&state, submission("t1", "visit-card", "1", 5.0))
            .await
            .expect("submission");
        submit_score(&state, submission("t2", "mind-battle", "2", 7.0))
            .await
            .expect("submission");

        let snapshot = clear_all_scores(&state).await.expect("clear");
        assert!(snapshot.scores.is_empty());
        assert!(snapshot.standings.is_empty());
        // The roster survives a ledger wipe.
        assert_eq!(snapshot.teams.len(), 2);
    }

    #[tokio::test]
    async fn unknown_contest_is_rejected() {
        let state = test_state().await;
        let result = submit_score(&state, submission("t1", "karaoke", "1", 5.0)).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn unknown_team_is_rejected() {
        let state = test_state().await;
        let result = submit_score(&state, submission("ghost", "visit-card", "1", 5.0)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn concurrent_submissions_for_distinct_triples_all_persist() {
        let state = test_state().await;

        let mut handles = Vec::new();
        for team in ["t1", "t2"] {
            for jury in ["1", "2", "3", "4", "5", "6"] {
                let state = state.clone();
                let request = submission(team, "practical-skills", jury, 5.0);
                handles.push(tokio::spawn(async move {
                    submit_score(&state, request).await
                }));
            }
        }

        for handle in handles {
            handle
                .await
                .expect("task completed")
                .expect("submission accepted");
        }

        let rows = ledger(&state).await.expect("ledger");
        assert_eq!(rows.len(), 12);
        let published = standings(&state).await.expect("standings");
        assert_eq!(published.len(), 2);
        assert!(published.iter().all(|row| row.jury_count == 6));
    }
}
