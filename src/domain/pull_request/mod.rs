//! Pull request domain module.
//!
//! Holds the pull request aggregate and its reviewer assignments.

mod aggregate;

pub use aggregate::{PullRequest, PullRequestShort, ReplaceRejection};
