//! Team roster management.
//!
//! Roster changes are administrative and stay available while the score
//! freeze is engaged, but they still pass the shared write gate because
//! removing a team cascades into the ledger and the standings.

use tracing::info;
use uuid::Uuid;

use crate::{
    dto::teams::{TeamInput, TeamRow},
    error::ServiceError,
    services::scoring_service::{recompute_and_publish, require_identity},
    state::SharedState,
};
use crate::dao::models::TeamEntity;

/// All registered teams, in registration order.
pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamRow>, ServiceError> {
    let store = state.require_score_store().await?;
    let teams = store.list_teams().await?;
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Register a team, generating an id when the caller supplies none.
pub async fn create_team(
    state: &SharedState,
    input: TeamInput,
) -> Result<TeamRow, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    let id = match input.id {
        Some(id) => {
            require_identity(&id, "id")?;
            id
        }
        None => Uuid::new_v4().to_string(),
    };
    require_identity(&input.name, "name")?;

    if store.find_team(id.clone()).await?.is_some() {
        return Err(ServiceError::InvalidInput(format!(
            "team `{id}` already exists"
        )));
    }

    let team = TeamEntity {
        id,
        name: input.name,
        members: input.members,
        total_score: input.total_score,
    };
    store.save_team(team.clone()).await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(team_id = %team.id, name = %team.name, "team registered");
    Ok(team.into())
}

/// Update an existing team's name, members, or carried total.
pub async fn update_team(
    state: &SharedState,
    id: String,
    input: TeamInput,
) -> Result<TeamRow, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    require_identity(&id, "id")?;
    require_identity(&input.name, "name")?;

    if store.find_team(id.clone()).await?.is_none() {
        return Err(ServiceError::NotFound(format!("team `{id}` not found")));
    }

    let team = TeamEntity {
        id,
        name: input.name,
        members: input.members,
        total_score: input.total_score,
    };
    store.save_team(team.clone()).await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(team_id = %team.id, "team updated");
    Ok(team.into())
}

/// Replace the whole roster in one request.
///
/// Ledger rows for teams that drop out of the roster stay in storage but no
/// longer surface in the standings, matching what a later re-add expects.
pub async fn replace_roster(
    state: &SharedState,
    inputs: Vec<TeamInput>,
) -> Result<Vec<TeamRow>, ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    let mut teams = Vec::with_capacity(inputs.len());
    for input in inputs {
        let id = match input.id {
            Some(id) => {
                require_identity(&id, "id")?;
                id
            }
            None => Uuid::new_v4().to_string(),
        };
        require_identity(&input.name, "name")?;
        teams.push(TeamEntity {
            id,
            name: input.name,
            members: input.members,
            total_score: input.total_score,
        });
    }

    let count = teams.len();
    store.replace_teams(teams.clone()).await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(count, "team roster replaced");
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Remove a team along with every score it received.
pub async fn delete_team(state: &SharedState, id: String) -> Result<(), ServiceError> {
    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    require_identity(&id, "id")?;

    if !store.delete_team(id.clone()).await? {
        return Err(ServiceError::NotFound(format!("team `{id}` not found")));
    }
    let removed_scores = store.delete_scores_for_team(id.clone()).await?;
    recompute_and_publish(&store, state.config()).await?;

    info!(team_id = %id, removed_scores, "team removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::score_store::memory::MemoryScoreStore,
        dto::scores::SubmitScoreRequest,
        services::{lock_service, scoring_service},
        state::{AppState, SharedState},
    };

    async fn test_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;
        state
    }

    fn input(name: &str) -> TeamInput {
        TeamInput {
            id: None,
            name: name.to_owned(),
            members: vec![],
            total_score: 0.0,
        }
    }

    #[tokio::test]
    async fn create_generates_an_id_and_rejects_duplicates() {
        let state = test_state().await;

        let team = create_team(&state, input("Team Alpha")).await.expect("create");
        assert!(!team.id.is_empty());

        let duplicate = create_team(
            &state,
            TeamInput {
                id: Some(team.id.clone()),
                ..input("Copycat")
            },
        )
        .await;
        assert!(matches!(duplicate, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn update_of_a_missing_team_is_not_found() {
        let state = test_state().await;
        let result = update_team(&state, "ghost".into(), input("Team Ghost")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_a_team_cascades_into_the_ledger_even_while_locked() {
        let state = test_state().await;

        let team = create_team(&state, input("Team Alpha")).await.expect("create");
        scoring_service::submit_score(
            &state,
            SubmitScoreRequest {
                team_id: team.id.clone(),
                contest_id: "visit-card".into(),
                jury_id: "1".into(),
                score: 5.0,
                details: None,
            },
        )
        .await
        .expect("submission");

        lock_service::set_locked(&state, true, "organizer1")
            .await
            .expect("lock");

        delete_team(&state, team.id).await.expect("delete");

        let ledger = scoring_service::ledger(&state).await.expect("ledger");
        assert!(ledger.is_empty());
        let standings = scoring_service::standings(&state).await.expect("standings");
        assert!(standings.is_empty());
    }
}
