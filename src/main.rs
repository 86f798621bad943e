//! Jury board backend entrypoint wiring the REST surface to the score store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use juryboard_back::{
    config::AppConfig,
    dao::score_store::memory::MemoryScoreStore,
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config);

    spawn_store_backend(app_state.clone()).await;
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the storage backend selected by `STORE_BACKEND`.
///
/// `memory` installs the in-process store immediately; anything else hands
/// connection management to the supervisor, which keeps the application in
/// degraded mode until the database is reachable.
async fn spawn_store_backend(state: SharedState) {
    let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "mongo".into());

    if backend.eq_ignore_ascii_case("memory") {
        info!("using in-memory score store");
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;
        return;
    }

    #[cfg(feature = "mongo-store")]
    {
        use juryboard_back::{
            dao::score_store::{
                ScoreStore,
                mongodb::{MongoConfig, MongoScoreStore},
            },
            services::storage_supervisor,
        };

        tokio::spawn(storage_supervisor::run(state, || async {
            let config = MongoConfig::from_env().await?;
            let store = MongoScoreStore::connect(config).await?;
            Ok(Arc::new(store) as Arc<dyn ScoreStore>)
        }));
    }

    #[cfg(not(feature = "mongo-store"))]
    {
        tracing::warn!(
            %backend,
            "no database backend compiled in; falling back to the in-memory store"
        );
        state
            .set_score_store(Arc::new(MemoryScoreStore::new()))
            .await;
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
