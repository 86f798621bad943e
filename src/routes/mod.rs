use axum::Router;

use crate::state::SharedState;

pub mod audit;
pub mod backup;
pub mod docs;
pub mod health;
pub mod identity;
pub mod lock;
pub mod meta;
pub mod scores;
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(scores::router())
        .merge(teams::router())
        .merge(lock::router())
        .merge(audit::router())
        .merge(backup::router())
        .merge(meta::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
