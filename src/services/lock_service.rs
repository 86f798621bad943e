//! Global score freeze.
//!
//! The lock is a single flag persisted in the store so every instance sees
//! the same gate. Engaging it records who flipped it and when; releasing it
//! discards that metadata entirely.

use std::time::SystemTime;

use tracing::info;

use crate::{
    dao::models::LockStateEntity,
    dto::lock::LockStatus,
    error::ServiceError,
    services::scoring_service::require_identity,
    state::SharedState,
};

/// Current freeze state. An absent record reads as unlocked.
pub async fn status(state: &SharedState) -> Result<LockStatus, ServiceError> {
    let store = state.require_score_store().await?;
    let lock = store.load_lock().await?.unwrap_or_else(LockStateEntity::unlocked);
    Ok(lock.into())
}

/// Engage or release the freeze.
///
/// Idempotent in effect, but re-locking refreshes the metadata to the most
/// recent actor and instant.
pub async fn set_locked(
    state: &SharedState,
    locked: bool,
    actor: &str,
) -> Result<LockStatus, ServiceError> {
    require_identity(actor, "actor")?;

    let store = state.require_score_store().await?;
    let _gate = state.write_gate().lock().await;

    let lock = if locked {
        LockStateEntity {
            locked: true,
            locked_at: Some(SystemTime::now()),
            locked_by: Some(actor.to_owned()),
        }
    } else {
        LockStateEntity::unlocked()
    };

    store.save_lock(lock.clone()).await?;
    info!(locked, %actor, "score freeze updated");
    Ok(lock.into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::score_store::memory::MemoryScoreStore,
        state::AppState,
    };

    #[tokio::test]
    async fn lock_records_metadata_and_unlock_clears_it() {
        let state = AppState::new(AppConfig::default());
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;

        let initial = status(&state).await.expect("status");
        assert!(!initial.locked);
        assert!(initial.locked_by.is_none());

        let locked = set_locked(&state, true, "organizer1").await.expect("lock");
        assert!(locked.locked);
        assert_eq!(locked.locked_by.as_deref(), Some("organizer1"));
        assert!(locked.locked_at.is_some());

        let released = set_locked(&state, false, "organizer2")
            .await
            .expect("unlock");
        assert!(!released.locked);
        assert!(released.locked_by.is_none());
        assert!(released.locked_at.is_none());
    }

    #[tokio::test]
    async fn blank_actor_is_rejected() {
        let state = AppState::new(AppConfig::default());
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;

        let result = set_locked(&state, true, "  ").await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }
}
