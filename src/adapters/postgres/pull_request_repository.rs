//! PostgreSQL implementation of PullRequestRepository.
//!
//! Reviewer rows carry a slot so that in-place replacement keeps the
//! original order. Merge and replacement are conditional updates.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{PullRequestRow, PullRequestShortRow};
use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, Timestamp, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestShort};
use crate::ports::PullRequestRepository;

/// PostgreSQL implementation of PullRequestRepository.
#[derive(Clone)]
pub struct PostgresPullRequestRepository {
    pool: PgPool,
}

impl PostgresPullRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn reviewer_not_found(pr_id: &PullRequestId, old: &UserId) -> DomainError {
    DomainError::new(
        ErrorCode::ReviewerNotFound,
        format!("no open assignment of {} on pull request {}", old, pr_id),
    )
    .with_detail("id", pr_id.to_string())
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn exists(&self, id: &PullRequestId) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pull_requests WHERE pull_request_id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("check_pull_request_existence", e))?;

        Ok(exists)
    }

    async fn create_with_reviewers(
        &self,
        pr: &PullRequest,
        reviewers: &[UserId],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin_transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO pull_requests (
                pull_request_id, pull_request_name, author_id, status, created_at, merged_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(pr.id().as_uuid())
        .bind(pr.title())
        .bind(pr.author_id().as_uuid())
        .bind(pr.status().as_str())
        .bind(*pr.created_at().as_datetime())
        .bind(pr.merged_at().map(|at| *at.as_datetime()))
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(
                    DomainError::new(ErrorCode::PullRequestExists, "Pull request already exists")
                        .with_detail("id", pr.id().to_string()),
                );
            }
            Err(e) => {
                return Err(DomainError::database("insert_pull_request", e)
                    .with_detail("id", pr.id().to_string()))
            }
        }

        for (slot, reviewer) in reviewers.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pr_reviewers (pull_request_id, user_id, slot) VALUES ($1, $2, $3)",
            )
            .bind(pr.id().as_uuid())
            .bind(reviewer.as_uuid())
            .bind(slot as i16)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::database("insert_reviewer", e).with_detail("id", pr.id().to_string())
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit_transaction", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PullRequestId) -> Result<Option<PullRequest>, DomainError> {
        let row: Option<PullRequestRow> = sqlx::query_as(
            r#"
            SELECT pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status,
                   pr.created_at, pr.merged_at,
                   COALESCE(
                       array_agg(r.user_id ORDER BY r.slot) FILTER (WHERE r.user_id IS NOT NULL),
                       '{}'
                   ) AS reviewers
            FROM pull_requests pr
            LEFT JOIN pr_reviewers r ON r.pull_request_id = pr.pull_request_id
            WHERE pr.pull_request_id = $1
            GROUP BY pr.pull_request_id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_pull_request", e).with_detail("id", id.to_string()))?;

        row.map(PullRequest::try_from).transpose()
    }

    async fn mark_merged(&self, id: &PullRequestId, merged_at: Timestamp) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE pull_requests
            SET status = 'merged', merged_at = $2
            WHERE pull_request_id = $1 AND status = 'open'
            "#,
        )
        .bind(id.as_uuid())
        .bind(*merged_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("merge_pull_request", e).with_detail("id", id.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_reviewer(
        &self,
        pr_id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE pr_reviewers
            SET user_id = $3, assigned_at = NOW()
            WHERE pull_request_id = $1
              AND user_id = $2
              AND EXISTS (
                  SELECT 1 FROM pull_requests
                  WHERE pull_request_id = $1 AND status = 'open'
              )
              AND NOT EXISTS (
                  SELECT 1 FROM pr_reviewers
                  WHERE pull_request_id = $1 AND user_id = $3
              )
            "#,
        )
        .bind(pr_id.as_uuid())
        .bind(old.as_uuid())
        .bind(new.as_uuid())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(()),
            Ok(_) => Err(reviewer_not_found(pr_id, old)),
            // Lost a race to assign the same incoming reviewer
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(reviewer_not_found(pr_id, old))
            }
            Err(e) => Err(DomainError::database("replace_reviewer", e).with_detail("id", pr_id.to_string())),
        }
    }

    async fn find_by_reviewer(&self, user_id: &UserId) -> Result<Vec<PullRequestShort>, DomainError> {
        let rows: Vec<PullRequestShortRow> = sqlx::query_as(
            r#"
            SELECT pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status
            FROM pull_requests pr
            JOIN pr_reviewers r ON r.pull_request_id = pr.pull_request_id
            WHERE r.user_id = $1
            ORDER BY pr.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch_reviewer_pull_requests", e))?;

        rows.into_iter().map(PullRequestShort::try_from).collect()
    }
}
