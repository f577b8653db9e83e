//! Runs the taskboard HTTP server.
//!
//! Configuration comes from environment variables (see
//! [`taskboard::config`]). Without `DATABASE_URL` the server keeps everything
//! in memory, which suits local trials; with it, the tables are created if
//! missing and all data lives in `PostgreSQL`.
//!
//! When `TASKBOARD_OVERDUE_SWEEP_SECS` is set, a background task runs the
//! overdue sweep at that interval.

use std::sync::Arc;
use std::time::Duration;

use taskboard::config::{AppConfig, ConfigError};
use taskboard::database::{self, DatabaseError};
use taskboard::http::{AppState, Repositories, router, state::Overdue};
use taskboard::identity::adapters::memory::InMemorySessionStore;
use taskboard::identity::services::AuthError;
use taskboard::task::domain::TaskStatusPolicy;
use taskboard::telemetry::init_tracing;
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseError),
    #[error("database setup task failed: {0}")]
    SetupTask(#[from] tokio::task::JoinError),
    #[error("seeding default users failed: {0}")]
    Seed(#[from] AuthError),
    #[error("failed to bind or serve: {0}")]
    Serve(#[source] std::io::Error),
}

fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env().map_err(ServerError::from)?;
    init_tracing(config.log_format);
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServerError::RuntimeInit)?;
    runtime.block_on(serve(config)).map_err(Into::into)
}

async fn serve(config: AppConfig) -> Result<(), ServerError> {
    let sessions = Arc::new(InMemorySessionStore::with_ttl(config.session_ttl));
    let repositories = build_repositories(&config).await?.with_sessions(sessions);
    let state = AppState::new(&repositories, TaskStatusPolicy::new(config.progression));

    if config.seed_users {
        let created = state.auth().seed_default_users().await?;
        tracing::info!(created, "seeded default accounts");
    }

    if let Some(interval) = config.overdue_sweep_interval {
        tokio::spawn(run_overdue_sweep(state.overdue_handle(), interval));
        tracing::info!(interval_secs = interval.as_secs(), "overdue sweep scheduled");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!(
        addr = %config.bind_addr,
        progression = config.progression.as_str(),
        "taskboard listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn build_repositories(config: &AppConfig) -> Result<Repositories, ServerError> {
    let Some(url) = config.database_url.clone() else {
        tracing::info!("DATABASE_URL unset; using in-memory storage");
        return Ok(Repositories::in_memory());
    };
    let pool_size = config.pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        let pool = database::connect(&url, pool_size).map_err(DatabaseError::from)?;
        database::apply_schema(&pool)?;
        Ok::<_, DatabaseError>(pool)
    })
    .await??;
    tracing::info!(pool_size, "connected to PostgreSQL");
    Ok(Repositories::postgres(&pool))
}

async fn run_overdue_sweep(overdue: Arc<Overdue>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        if let Err(err) = overdue.sweep().await {
            tracing::error!(error = %err, "overdue sweep failed");
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
