//! UUID-backed identifiers for users and pull requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Parses a raw identifier, rejecting empty, malformed and nil values.
fn parse_identifier(raw: &str, field: &str) -> Result<Uuid, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    let uuid = Uuid::parse_str(trimmed)
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))?;

    if uuid.is_nil() {
        return Err(ValidationError::nil_identifier(field));
    }

    Ok(uuid)
}

/// Unique identifier for a user (team member / reviewer / author).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random UserId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses and validates a user identifier supplied by a caller.
    ///
    /// `field` names the input in the returned error.
    pub fn parse(raw: &str, field: &str) -> Result<Self, ValidationError> {
        parse_identifier(raw, field).map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns true for the all-zero sentinel value.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestId(Uuid);

impl PullRequestId {
    /// Creates a new random PullRequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PullRequestId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses and validates a pull request identifier supplied by a caller.
    pub fn parse(raw: &str, field: &str) -> Result<Self, ValidationError> {
        parse_identifier(raw, field).map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns true for the all-zero sentinel value.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for PullRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PullRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
