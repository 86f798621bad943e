//! Read side of the audit log.

use crate::{dto::audit::AuditRow, error::ServiceError, state::SharedState};

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 500;

/// Most recent audit entries, newest first.
///
/// The requested limit is clamped to `1..=500` and defaults to 100; a zero
/// limit falls back to the default rather than returning nothing.
pub async fn query(
    state: &SharedState,
    limit: Option<usize>,
) -> Result<Vec<AuditRow>, ServiceError> {
    let store = state.require_score_store().await?;
    let entries = store.list_audit(clamp_limit(limit)).await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

fn clamp_limit(limit: Option<usize>) -> usize {
    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(n) => n.min(MAX_LIMIT).max(1),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{models::TeamEntity, score_store::memory::MemoryScoreStore},
        dto::scores::SubmitScoreRequest,
        services::scoring_service,
        state::AppState,
    };

    #[test]
    fn limit_clamps_to_the_allowed_window() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 100);
        assert_eq!(clamp_limit(Some(1)), 1);
        assert_eq!(clamp_limit(Some(250)), 250);
        assert_eq!(clamp_limit(Some(9_999)), 500);
    }

    #[tokio::test]
    async fn entries_come_back_newest_first_and_limited() {
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

        for score in [1.0, 2.0, 3.0] {
            scoring_service::submit_score(
                &state,
                SubmitScoreRequest {
                    team_id: "t1".into(),
                    contest_id: "visit-card".into(),
                    jury_id: "1".into(),
                    score,
                    details: None,
                },
            )
            .await
            .expect("submission");
        }

        let rows = query(&state, Some(2)).await.expect("audit");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].new_score, 3.0);
        assert_eq!(rows[1].new_score, 2.0);
    }
}
