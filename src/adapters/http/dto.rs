//! Request and response DTOs for the HTTP API.
//!
//! Identifiers travel as strings on the way in so malformed values can be
//! reported as `INVALID_REQUEST` instead of a serde rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pull_request::{PullRequest, PullRequestShort};
use crate::domain::statistics::{PrStats, Statistics, UserAssignmentStats};
use crate::domain::team::{Team, TeamMember, User};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Member entry inside `POST /team/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberRequest {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Body of `POST /team/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub members: Vec<TeamMemberRequest>,
}

/// Query of `GET /team/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamNameQuery {
    pub team_name: String,
}

/// Body of `POST /users/setIsActive`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetUserActiveRequest {
    pub user_id: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Query of `GET /users/getReview`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// Body of `POST /pullRequest/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

/// Body of `POST /pullRequest/merge`.
#[derive(Debug, Clone, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

/// Body of `POST /pullRequest/reassign`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMemberResponse {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl From<&TeamMember> for TeamMemberResponse {
    fn from(member: &TeamMember) -> Self {
        Self {
            user_id: member.user_id.to_string(),
            username: member.username.clone(),
            is_active: member.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamResponse {
    pub team_name: String,
    pub members: Vec<TeamMemberResponse>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.team_name.clone(),
            members: team.members.iter().map(TeamMemberResponse::from).collect(),
        }
    }
}

/// `{"team": ...}` wrapper returned on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEnvelope {
    pub team: TeamResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            username: user.username.clone(),
            team_name: user.team_name.clone(),
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Full pull request view. Timestamp keys are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<&PullRequest> for PullRequestResponse {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.title().to_string(),
            author_id: pr.author_id().to_string(),
            status: pr.status().as_str().to_string(),
            assigned_reviewers: pr.assigned_reviewers().iter().map(ToString::to_string).collect(),
            created_at: *pr.created_at().as_datetime(),
            merged_at: pr.merged_at().map(|at| *at.as_datetime()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignResponse {
    pub pr: PullRequestResponse,
    pub replaced_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestShortResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl From<&PullRequestShort> for PullRequestShortResponse {
    fn from(pr: &PullRequestShort) -> Self {
        Self {
            pull_request_id: pr.id.to_string(),
            pull_request_name: pr.title.clone(),
            author_id: pr.author_id.to_string(),
            status: pr.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrStatsResponse {
    pub total_open: u64,
    pub total_merged: u64,
    pub total_prs: u64,
    pub avg_merge_time_hours: f64,
}

impl From<&PrStats> for PrStatsResponse {
    fn from(stats: &PrStats) -> Self {
        Self {
            total_open: stats.total_open,
            total_merged: stats.total_merged,
            total_prs: stats.total_prs,
            avg_merge_time_hours: stats.avg_merge_time_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAssignmentStatsResponse {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub total_assignments: u64,
    pub open_assignments: u64,
    pub merged_assignments: u64,
}

impl From<&UserAssignmentStats> for UserAssignmentStatsResponse {
    fn from(stats: &UserAssignmentStats) -> Self {
        Self {
            user_id: stats.user_id.to_string(),
            username: stats.username.clone(),
            team_name: stats.team_name.clone(),
            total_assignments: stats.total_assignments,
            open_assignments: stats.open_assignments,
            merged_assignments: stats.merged_assignments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub pr_stats: PrStatsResponse,
    pub user_stats: Vec<UserAssignmentStatsResponse>,
    pub total_users: u64,
    pub total_teams: u64,
    pub active_users: u64,
}

impl From<&Statistics> for StatisticsResponse {
    fn from(stats: &Statistics) -> Self {
        Self {
            pr_stats: PrStatsResponse::from(&stats.pr_stats),
            user_stats: stats
                .user_assignments
                .iter()
                .map(UserAssignmentStatsResponse::from)
                .collect(),
            total_users: stats.total_users,
            total_teams: stats.total_teams,
            active_users: stats.active_users,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
