//! PullRequestStatus enum for tracking the lifecycle of pull requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Lifecycle status of a pull request.
///
/// Valid transitions:
/// - Open -> Merged
///
/// Merged is terminal: merged pull requests are frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestStatus {
    #[default]
    Open,
    Merged,
}

impl PullRequestStatus {
    /// Returns true if reviewers may still be changed.
    pub fn is_open(&self) -> bool {
        matches!(self, PullRequestStatus::Open)
    }

    /// Only open -> merged is allowed.
    pub fn can_transition_to(&self, target: PullRequestStatus) -> bool {
        matches!(
            (self, target),
            (PullRequestStatus::Open, PullRequestStatus::Merged)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PullRequestStatus::Merged)
    }

    /// Returns `target` if the move is allowed from the current status.
    pub fn transition_to(&self, target: PullRequestStatus) -> Result<Self, ValidationError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot move pull request from {} to {}", self, target),
            ))
        }
    }

    /// Storage / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Open => "open",
            PullRequestStatus::Merged => "merged",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PullRequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(PullRequestStatus::Open),
            "merged" => Ok(PullRequestStatus::Merged),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}
