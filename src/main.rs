//! PR Reviewer server binary.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pr_reviewer::adapters::http::{api_router, AppState};
use pr_reviewer::adapters::postgres::{
    self, PostgresPullRequestRepository, PostgresStatisticsReader, PostgresTeamRepository,
    PostgresUserRepository,
};
use pr_reviewer::adapters::InMemoryStore;
use pr_reviewer::config::{AppConfig, StorageBackend};
use pr_reviewer::domain::review::ReviewerSelector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config)?;
    config.validate().context("invalid configuration")?;

    let selector = Arc::new(ReviewerSelector::from_seed_option(config.review.rng_seed));
    let state = build_state(&config, selector).await?;
    let app = api_router(state);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        storage = ?config.database.storage,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

async fn build_state(config: &AppConfig, selector: Arc<ReviewerSelector>) -> anyhow::Result<AppState> {
    let admin_token = config.server.admin_token.as_str();
    let operation_timeout = config.review.operation_timeout();
    let request_timeout = config.server.request_timeout();

    match config.database.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(AppState::in_memory(
                Arc::new(InMemoryStore::new()),
                selector,
                admin_token,
                operation_timeout,
                request_timeout,
            ))
        }
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations {
                postgres::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                tracing::info!("Database migrations applied");
            }

            Ok(AppState {
                team_repository: Arc::new(PostgresTeamRepository::new(pool.clone())),
                user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
                pull_request_repository: Arc::new(PostgresPullRequestRepository::new(pool.clone())),
                statistics_reader: Arc::new(PostgresStatisticsReader::new(pool)),
                selector,
                admin_token: admin_token.into(),
                operation_timeout,
                request_timeout,
            })
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
