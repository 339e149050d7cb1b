//! Errors surfaced by reviewer assignment and lifecycle operations.

use std::time::Duration;

use crate::domain::foundation::{
    DeadlineExceeded, DomainError, ErrorCode, PullRequestId, UserId, ValidationError,
};

/// Error returned by every application handler.
///
/// Each variant maps onto exactly one wire token via [`ReviewError::code`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("team '{0}' already exists")]
    TeamExists(String),

    #[error("team '{0}' not found")]
    TeamNotFound(String),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("pull request {0} already exists")]
    PullRequestExists(String),

    #[error("pull request {0} not found")]
    PullRequestNotFound(String),

    #[error("pull request {0} is merged")]
    PullRequestMerged(PullRequestId),

    #[error("reviewer {reviewer} is not assigned to pull request {pull_request}")]
    NotAssigned {
        pull_request: PullRequestId,
        reviewer: UserId,
    },

    #[error("no active replacement candidate in team '{team}'")]
    NoCandidate { team: String },

    #[error("reviewer assignment not found: {0}")]
    ReviewerNotFound(String),

    #[error("operation exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ReviewError {
    pub fn internal(message: impl Into<String>) -> Self {
        ReviewError::Internal(message.into())
    }

    /// Wire token for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::Validation(_) => ErrorCode::ValidationFailed,
            ReviewError::TeamExists(_) => ErrorCode::TeamExists,
            ReviewError::TeamNotFound(_) => ErrorCode::TeamNotFound,
            ReviewError::UserNotFound(_) => ErrorCode::UserNotFound,
            ReviewError::PullRequestExists(_) => ErrorCode::PullRequestExists,
            ReviewError::PullRequestNotFound(_) => ErrorCode::PullRequestNotFound,
            ReviewError::PullRequestMerged(_) => ErrorCode::PullRequestMerged,
            ReviewError::NotAssigned { .. } => ErrorCode::NotAssigned,
            ReviewError::NoCandidate { .. } => ErrorCode::NoCandidate,
            ReviewError::ReviewerNotFound(_) => ErrorCode::ReviewerNotFound,
            ReviewError::Timeout(_) => ErrorCode::Timeout,
            ReviewError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        let subject = err
            .details
            .get("id")
            .cloned()
            .unwrap_or_else(|| err.message.clone());

        match err.code {
            ErrorCode::TeamExists => ReviewError::TeamExists(subject),
            ErrorCode::TeamNotFound => ReviewError::TeamNotFound(subject),
            ErrorCode::UserNotFound => ReviewError::UserNotFound(subject),
            ErrorCode::PullRequestExists => ReviewError::PullRequestExists(subject),
            ErrorCode::PullRequestNotFound => ReviewError::PullRequestNotFound(subject),
            ErrorCode::ReviewerNotFound => ReviewError::ReviewerNotFound(err.message),
            ErrorCode::ValidationFailed => ReviewError::Validation(ValidationError::invalid_format(
                err.details.get("field").cloned().unwrap_or_else(|| "input".to_string()),
                err.message,
            )),
            _ => ReviewError::Internal(err.to_string()),
        }
    }
}

impl From<DeadlineExceeded> for ReviewError {
    fn from(err: DeadlineExceeded) -> Self {
        ReviewError::Timeout(err.timeout)
    }
}
