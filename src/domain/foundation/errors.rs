//! Validation failures and coded domain errors shared by every layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and entity validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' too long (max {max} characters, got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' cannot be nil UUID")]
    NilIdentifier { field: String },

    #[error("Team must have at least one member")]
    NoMembers,

    #[error("Duplicate user_id in team: {user_id}")]
    DuplicateMember { user_id: String },

    #[error("Expected exactly {expected} reviewers, got {actual}")]
    ReviewerCount { expected: usize, actual: usize },

    #[error("Invalid PR status: {value}, must be open or merged")]
    InvalidStatus { value: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a nil identifier validation error.
    pub fn nil_identifier(field: impl Into<String>) -> Self {
        ValidationError::NilIdentifier { field: field.into() }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NilIdentifier { field } => Some(field),
            ValidationError::NoMembers | ValidationError::DuplicateMember { .. } => Some("members"),
            ValidationError::ReviewerCount { .. } => Some("assigned_reviewers"),
            ValidationError::InvalidStatus { .. } => Some("status"),
        }
    }
}

/// Stable error codes; the wire token is the `Display` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Conflict errors
    TeamExists,
    PullRequestExists,

    // Not found errors
    TeamNotFound,
    UserNotFound,
    PullRequestNotFound,
    ReviewerNotFound,

    // State errors
    PullRequestMerged,
    NotAssigned,
    NoCandidate,

    // Infrastructure errors
    Timeout,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_ERROR",
            ErrorCode::TeamExists => "TEAM_EXISTS",
            ErrorCode::PullRequestExists => "PR_EXISTS",
            ErrorCode::TeamNotFound => "TEAM_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::PullRequestNotFound => "PR_NOT_FOUND",
            ErrorCode::ReviewerNotFound => "REVIEWER_NOT_FOUND",
            ErrorCode::PullRequestMerged => "PR_MERGED",
            ErrorCode::NotAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

/// A coded failure with a human message and optional key/value context.
///
/// This is the error currency of the persistence ports. Adapters attach the
/// failing operation and identifier as details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error for the named operation.
    pub fn database(operation: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DatabaseError,
            format!("Failed to {}: {}", operation.replace('_', " "), err),
        )
        .with_detail("operation", operation)
    }

    /// Attaches context, e.g. the offending id.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("team_name");
        assert_eq!(format!("{}", err), "Field 'team_name' cannot be empty");
    }

    #[test]
    fn validation_error_too_long_displays_correctly() {
        let err = ValidationError::too_long("username", 255, 300);
        assert_eq!(
            format!("{}", err),
            "Field 'username' too long (max 255 characters, got 300)"
        );
    }

    #[test]
    fn validation_error_reviewer_count_displays_correctly() {
        let err = ValidationError::ReviewerCount {
            expected: 2,
            actual: 1,
        };
        assert_eq!(format!("{}", err), "Expected exactly 2 reviewers, got 1");
    }

    #[test]
    fn validation_error_reports_field() {
        assert_eq!(ValidationError::nil_identifier("author_id").field(), Some("author_id"));
        assert_eq!(ValidationError::NoMembers.field(), Some("members"));
    }

    #[test]
    fn display_prefixes_the_wire_code() {
        let err = DomainError::new(ErrorCode::PullRequestNotFound, "PR not found");
        assert_eq!(format!("{}", err), "[PR_NOT_FOUND] PR not found");
    }

    #[test]
    fn domain_error_database_records_operation() {
        let err = DomainError::database("insert_team", "connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Failed to insert team: connection reset");
        assert_eq!(err.details.get("operation"), Some(&"insert_team".to_string()));
    }

    #[test]
    fn details_accumulate() {
        let err = DomainError::new(ErrorCode::UserNotFound, "User not found")
            .with_detail("user_id", "abc");

        assert_eq!(err.details.get("user_id"), Some(&"abc".to_string()));
    }

    #[test]
    fn error_code_display_formats_tokens() {
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "VALIDATION_ERROR");
        assert_eq!(format!("{}", ErrorCode::PullRequestMerged), "PR_MERGED");
        assert_eq!(format!("{}", ErrorCode::NoCandidate), "NO_CANDIDATE");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL");
    }
}
