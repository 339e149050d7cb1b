//! Structural and business-rule checks for teams, members and pull requests.
//!
//! All checks are pure: they inspect a value and report the first
//! constraint it violates.

use std::collections::HashSet;

use crate::domain::foundation::{PullRequestId, PullRequestStatus, UserId, ValidationError};
use crate::domain::pull_request::PullRequest;
use crate::domain::team::{Team, TeamMember};

/// Maximum length, in characters, of team names, usernames and PR titles.
pub const MAX_NAME_LENGTH: usize = 255;

/// Number of reviewers assigned when a pull request is created.
pub const REQUIRED_REVIEWERS: usize = 2;

/// Stateless validator for the reviewer assignment domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Parses a caller-supplied user identifier.
    pub fn validate_user_id(raw: &str, field: &str) -> Result<UserId, ValidationError> {
        UserId::parse(raw, field)
    }

    /// Parses a caller-supplied pull request identifier.
    pub fn validate_pull_request_id(raw: &str, field: &str) -> Result<PullRequestId, ValidationError> {
        PullRequestId::parse(raw, field)
    }

    /// Parses a status string.
    pub fn validate_status(raw: &str) -> Result<PullRequestStatus, ValidationError> {
        raw.parse()
    }

    /// Checks a name-like field: non-blank and at most [`MAX_NAME_LENGTH`] characters.
    pub fn validate_name(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let length = value.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::too_long(field, MAX_NAME_LENGTH, length));
        }
        Ok(())
    }

    pub fn validate_team_member(member: &TeamMember) -> Result<(), ValidationError> {
        if member.user_id.is_nil() {
            return Err(ValidationError::nil_identifier("user_id"));
        }
        Self::validate_name(&member.username, "username")
    }

    /// Checks the team name, roster size, every member, and member uniqueness.
    pub fn validate_team(team: &Team) -> Result<(), ValidationError> {
        Self::validate_name(&team.team_name, "team_name")?;

        if team.members.is_empty() {
            return Err(ValidationError::NoMembers);
        }

        let mut seen = HashSet::with_capacity(team.members.len());
        for member in &team.members {
            Self::validate_team_member(member)?;
            if !seen.insert(member.user_id) {
                return Err(ValidationError::DuplicateMember {
                    user_id: member.user_id.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn validate_pull_request(pr: &PullRequest) -> Result<(), ValidationError> {
        if pr.id().is_nil() {
            return Err(ValidationError::nil_identifier("pull_request_id"));
        }
        Self::validate_name(pr.title(), "pull_request_name")?;
        if pr.author_id().is_nil() {
            return Err(ValidationError::nil_identifier("author_id"));
        }
        // Status is a closed enum; re-parsing its storage form keeps the
        // check aligned with values read back from persistence.
        Self::validate_status(pr.status().as_str()).map(|_| ())
    }

    /// Initial assignment requires exactly [`REQUIRED_REVIEWERS`] reviewers.
    pub fn validate_reviewer_count(reviewers: &[UserId]) -> Result<(), ValidationError> {
        if reviewers.len() != REQUIRED_REVIEWERS {
            return Err(ValidationError::ReviewerCount {
                expected: REQUIRED_REVIEWERS,
                actual: reviewers.len(),
            });
        }
        Ok(())
    }
}
