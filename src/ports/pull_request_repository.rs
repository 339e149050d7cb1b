//! Pull request repository port.
//!
//! Writes that race with concurrent requests are conditional: the store
//! applies them only if the row still matches what the caller observed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PullRequestId, Timestamp, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestShort};

/// Repository port for pull requests and their reviewer assignments.
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Check if a pull request exists.
    async fn exists(&self, id: &PullRequestId) -> Result<bool, DomainError>;

    /// Insert the pull request and one assignment row per reviewer.
    ///
    /// All rows are written or none are.
    ///
    /// # Errors
    ///
    /// - `PullRequestExists` if the id is taken
    /// - `DatabaseError` on persistence failure
    async fn create_with_reviewers(
        &self,
        pr: &PullRequest,
        reviewers: &[UserId],
    ) -> Result<(), DomainError>;

    /// Find a pull request with its current reviewers.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PullRequestId) -> Result<Option<PullRequest>, DomainError>;

    /// Mark the pull request merged if it is still open.
    ///
    /// Returns `false` when no open row matched (already merged or missing);
    /// `merged_at` is never overwritten.
    async fn mark_merged(&self, id: &PullRequestId, merged_at: Timestamp) -> Result<bool, DomainError>;

    /// Swap the `(pr, old)` assignment for `(pr, new)`.
    ///
    /// Applies only while the pull request is open, `old` is still assigned
    /// and `new` is not.
    ///
    /// # Errors
    ///
    /// - `ReviewerNotFound` if no row matched
    /// - `DatabaseError` on persistence failure
    async fn replace_reviewer(
        &self,
        pr_id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), DomainError>;

    /// Pull requests on which the user is an assigned reviewer, newest first.
    async fn find_by_reviewer(&self, user_id: &UserId) -> Result<Vec<PullRequestShort>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn pull_request_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PullRequestRepository) {}
    }
}
