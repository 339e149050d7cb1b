//! Database row types and their conversion into domain values.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, PullRequestId, PullRequestStatus, Timestamp, UserId,
};
use crate::domain::pull_request::{PullRequest, PullRequestShort};
use crate::domain::statistics::UserAssignmentStats;
use crate::domain::team::{TeamMember, User};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct TeamMemberRow {
    pub user_id: Uuid,
    pub username: String,
    pub is_active: bool,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        TeamMember::new(UserId::from_uuid(row.user_id), row.username, row.is_active)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::from_uuid(row.user_id),
            row.username,
            row.team_name,
            row.is_active,
        )
    }
}

/// Pull request row with reviewers aggregated in slot order.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct PullRequestRow {
    pub pull_request_id: Uuid,
    pub pull_request_name: String,
    pub author_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub reviewers: Vec<Uuid>,
}

impl TryFrom<PullRequestRow> for PullRequest {
    type Error = DomainError;

    fn try_from(row: PullRequestRow) -> Result<Self, Self::Error> {
        Ok(PullRequest::reconstitute(
            PullRequestId::from_uuid(row.pull_request_id),
            row.pull_request_name,
            UserId::from_uuid(row.author_id),
            parse_status(&row.status)?,
            row.reviewers.into_iter().map(UserId::from_uuid).collect(),
            Timestamp::from_datetime(row.created_at),
            row.merged_at.map(Timestamp::from_datetime),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PullRequestShortRow {
    pub pull_request_id: Uuid,
    pub pull_request_name: String,
    pub author_id: Uuid,
    pub status: String,
}

impl TryFrom<PullRequestShortRow> for PullRequestShort {
    type Error = DomainError;

    fn try_from(row: PullRequestShortRow) -> Result<Self, Self::Error> {
        Ok(PullRequestShort {
            id: PullRequestId::from_uuid(row.pull_request_id),
            title: row.pull_request_name,
            author_id: UserId::from_uuid(row.author_id),
            status: parse_status(&row.status)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserAssignmentRow {
    pub user_id: Uuid,
    pub username: String,
    pub team_name: String,
    pub total_assignments: i64,
    pub open_assignments: i64,
    pub merged_assignments: i64,
}

impl From<UserAssignmentRow> for UserAssignmentStats {
    fn from(row: UserAssignmentRow) -> Self {
        UserAssignmentStats {
            user_id: UserId::from_uuid(row.user_id),
            username: row.username,
            team_name: row.team_name,
            total_assignments: non_negative(row.total_assignments),
            open_assignments: non_negative(row.open_assignments),
            merged_assignments: non_negative(row.merged_assignments),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PrStatsRow {
    pub total_open: i64,
    pub total_merged: i64,
    pub total_prs: i64,
    pub avg_merge_time_hours: f64,
}

fn parse_status(raw: &str) -> Result<PullRequestStatus, DomainError> {
    raw.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid pull request status: {}", raw),
        )
    })
}

/// COUNT results are never negative; clamp instead of failing.
pub(super) fn non_negative(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
