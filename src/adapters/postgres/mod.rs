//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresTeamRepository` - Team creation with member upsert
//! - `PostgresUserRepository` - User lookup and activation
//! - `PostgresPullRequestRepository` - Pull requests and reviewer rows
//! - `PostgresStatisticsReader` - Aggregate statistics queries

mod pull_request_repository;
mod rows;
mod statistics_reader;
mod team_repository;
mod user_repository;

pub use pull_request_repository::PostgresPullRequestRepository;
pub use statistics_reader::PostgresStatisticsReader;
pub use team_repository::PostgresTeamRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens a connection pool sized and timed from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Applies the embedded SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
