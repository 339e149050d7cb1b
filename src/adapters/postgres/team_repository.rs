//! PostgreSQL implementation of TeamRepository.
//!
//! Team creation inserts the team row and upserts every member inside a
//! single transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::TeamMemberRow;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::team::Team;
use crate::ports::TeamRepository;

/// PostgreSQL implementation of TeamRepository.
#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn exists(&self, team_name: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = $1)")
                .bind(team_name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("check_team_existence", e))?;

        Ok(exists)
    }

    async fn create(&self, team: &Team) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin_transaction", e))?;

        let team_id = Uuid::new_v4();
        let inserted = sqlx::query("INSERT INTO teams (team_id, team_name) VALUES ($1, $2)")
            .bind(team_id)
            .bind(team.team_name.as_str())
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::new(ErrorCode::TeamExists, "Team already exists")
                    .with_detail("id", team.team_name.clone()));
            }
            Err(e) => return Err(DomainError::database("insert_team", e)),
        }

        for member in &team.members {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, username, team_id, is_active)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE SET
                    username = EXCLUDED.username,
                    team_id = EXCLUDED.team_id,
                    is_active = EXCLUDED.is_active,
                    updated_at = NOW()
                "#,
            )
            .bind(member.user_id.as_uuid())
            .bind(member.username.as_str())
            .bind(team_id)
            .bind(member.is_active)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("upsert_user", e).with_detail("id", member.user_id.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit_transaction", e))?;

        tracing::debug!(team_name = %team.team_name, %team_id, "Team row inserted");
        Ok(())
    }

    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, DomainError> {
        let team_id: Option<(Uuid,)> = sqlx::query_as("SELECT team_id FROM teams WHERE team_name = $1")
            .bind(team_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch_team", e))?;

        let Some((team_id,)) = team_id else {
            return Ok(None);
        };

        let members: Vec<TeamMemberRow> = sqlx::query_as(
            r#"
            SELECT user_id, username, is_active
            FROM users
            WHERE team_id = $1
            ORDER BY username
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_team_members", e))?;

        Ok(Some(Team::new(
            team_name,
            members.into_iter().map(Into::into).collect(),
        )))
    }
}
