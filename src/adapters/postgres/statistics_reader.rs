//! PostgreSQL implementation of StatisticsReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{non_negative, PrStatsRow, UserAssignmentRow};
use crate::domain::foundation::DomainError;
use crate::domain::statistics::{PrStats, UserAssignmentStats};
use crate::ports::StatisticsReader;

/// PostgreSQL implementation of StatisticsReader.
#[derive(Clone)]
pub struct PostgresStatisticsReader {
    pool: PgPool,
}

impl PostgresStatisticsReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str, operation: &str) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(operation, e))?;
        Ok(non_negative(count))
    }
}

#[async_trait]
impl StatisticsReader for PostgresStatisticsReader {
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentStats>, DomainError> {
        let rows: Vec<UserAssignmentRow> = sqlx::query_as(
            r#"
            SELECT u.user_id,
                   u.username,
                   t.team_name,
                   COUNT(pr.pull_request_id) AS total_assignments,
                   COUNT(*) FILTER (WHERE pr.status = 'open') AS open_assignments,
                   COUNT(*) FILTER (WHERE pr.status = 'merged') AS merged_assignments
            FROM users u
            JOIN teams t ON u.team_id = t.team_id
            LEFT JOIN pr_reviewers r ON r.user_id = u.user_id
            LEFT JOIN pull_requests pr ON pr.pull_request_id = r.pull_request_id
            GROUP BY u.user_id, u.username, t.team_name
            ORDER BY total_assignments DESC, u.username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_user_assignment_stats", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn pr_stats(&self) -> Result<PrStats, DomainError> {
        let row: PrStatsRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = 'open') AS total_open,
                   COUNT(*) FILTER (WHERE status = 'merged') AS total_merged,
                   COUNT(*) AS total_prs,
                   COALESCE(
                       AVG(EXTRACT(EPOCH FROM (merged_at - created_at)) / 3600)
                           FILTER (WHERE merged_at IS NOT NULL),
                       0
                   )::float8 AS avg_merge_time_hours
            FROM pull_requests
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_pr_stats", e))?;

        Ok(PrStats {
            total_open: non_negative(row.total_open),
            total_merged: non_negative(row.total_merged),
            total_prs: non_negative(row.total_prs),
            avg_merge_time_hours: row.avg_merge_time_hours,
        })
    }

    async fn total_users(&self) -> Result<u64, DomainError> {
        self.count("SELECT COUNT(*) FROM users", "count_users").await
    }

    async fn total_teams(&self) -> Result<u64, DomainError> {
        self.count("SELECT COUNT(*) FROM teams", "count_teams").await
    }

    async fn active_users(&self) -> Result<u64, DomainError> {
        self.count("SELECT COUNT(*) FROM users WHERE is_active", "count_active_users")
            .await
    }
}
