//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::UserRow;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::team::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT u.user_id, u.username, t.team_name, u.is_active
            FROM users u
            JOIN teams t ON u.team_id = t.team_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_user", e).with_detail("id", id.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_team_members(&self, team_name: &str) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT u.user_id, u.username, t.team_name, u.is_active
            FROM users u
            JOIN teams t ON u.team_id = t.team_id
            WHERE t.team_name = $1
            ORDER BY u.username
            "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_team_members", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(id.as_uuid())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update_user_active", e).with_detail("id", id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            )
            .with_detail("id", id.to_string()));
        }

        Ok(())
    }
}
