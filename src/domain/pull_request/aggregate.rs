//! Pull request aggregate.
//!
//! A pull request carries its assigned reviewers. The lifecycle is
//! `open -> merged`; once merged the reviewer set is frozen.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    PullRequestId, PullRequestStatus, Timestamp, UserId, ValidationError,
};

/// Pull request with its reviewer assignments.
///
/// # Invariants
///
/// - the author never appears in `assigned_reviewers`
/// - `assigned_reviewers` contains no duplicates
/// - `merged_at` is set exactly once, on the open -> merged transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    id: PullRequestId,
    title: String,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: Vec<UserId>,
    created_at: Timestamp,
    merged_at: Option<Timestamp>,
}

/// Why a reviewer substitution was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceRejection {
    /// The pull request is merged.
    Frozen,
    /// The outgoing reviewer holds no assignment on this pull request.
    NotAssigned,
    /// The incoming reviewer is the author or already assigned.
    Ineligible,
}

impl PullRequest {
    /// Create a new open pull request with no reviewers yet.
    pub fn open(id: PullRequestId, title: impl Into<String>, author_id: UserId) -> Self {
        Self {
            id,
            title: title.into(),
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: Vec::new(),
            created_at: Timestamp::now(),
            merged_at: None,
        }
    }

    /// Reconstitute a pull request from persistence (no validation).
    pub fn reconstitute(
        id: PullRequestId,
        title: String,
        author_id: UserId,
        status: PullRequestStatus,
        assigned_reviewers: Vec<UserId>,
        created_at: Timestamp,
        merged_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            status,
            assigned_reviewers,
            created_at,
            merged_at,
        }
    }

    pub fn id(&self) -> PullRequestId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    pub fn assigned_reviewers(&self) -> &[UserId] {
        &self.assigned_reviewers
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn merged_at(&self) -> Option<Timestamp> {
        self.merged_at
    }

    /// Returns true if `user_id` currently holds a review assignment.
    pub fn is_assigned(&self, user_id: &UserId) -> bool {
        self.assigned_reviewers.contains(user_id)
    }

    /// Sets the initial reviewer set.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the author is among the reviewers or an id repeats
    pub fn assign_reviewers(&mut self, reviewers: Vec<UserId>) -> Result<(), ValidationError> {
        if reviewers.contains(&self.author_id) {
            return Err(ValidationError::invalid_format(
                "assigned_reviewers",
                "author cannot review own pull request",
            ));
        }
        for (i, reviewer) in reviewers.iter().enumerate() {
            if reviewers[..i].contains(reviewer) {
                return Err(ValidationError::invalid_format(
                    "assigned_reviewers",
                    format!("reviewer {} assigned twice", reviewer),
                ));
            }
        }
        self.assigned_reviewers = reviewers;
        Ok(())
    }

    /// Transitions to merged.
    ///
    /// Returns `false` without touching `merged_at` if already merged.
    pub fn merge(&mut self, at: Timestamp) -> bool {
        match self.status.transition_to(PullRequestStatus::Merged) {
            Ok(next) => {
                self.status = next;
                self.merged_at = Some(at);
                true
            }
            Err(_) => false,
        }
    }

    /// Swaps one reviewer for another, keeping the reviewer count unchanged.
    pub fn replace_reviewer(&mut self, old: &UserId, new: UserId) -> Result<(), ReplaceRejection> {
        if !self.status.is_open() {
            return Err(ReplaceRejection::Frozen);
        }
        if new == self.author_id || self.assigned_reviewers.contains(&new) {
            return Err(ReplaceRejection::Ineligible);
        }
        let slot = self
            .assigned_reviewers
            .iter_mut()
            .find(|r| **r == *old)
            .ok_or(ReplaceRejection::NotAssigned)?;
        *slot = new;
        Ok(())
    }

    /// Listing view used by "reviews for user" queries.
    pub fn to_short(&self) -> PullRequestShort {
        PullRequestShort {
            id: self.id,
            title: self.title.clone(),
            author_id: self.author_id,
            status: self.status,
        }
    }
}

/// Compact pull request view without reviewers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub id: PullRequestId,
    pub title: String,
    pub author_id: UserId,
    pub status: PullRequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_pr() -> (PullRequest, UserId) {
        let author = UserId::new();
        (PullRequest::open(PullRequestId::new(), "Add login", author), author)
    }

    #[test]
    fn open_starts_without_merge_time() {
        let (pr, _) = open_pr();
        assert_eq!(pr.status(), PullRequestStatus::Open);
        assert!(pr.merged_at().is_none());
        assert!(pr.assigned_reviewers().is_empty());
    }

    #[test]
    fn assign_reviewers_rejects_author() {
        let (mut pr, author) = open_pr();
        let result = pr.assign_reviewers(vec![author, UserId::new()]);
        assert!(result.is_err());
        assert!(pr.assigned_reviewers().is_empty());
    }

    #[test]
    fn assign_reviewers_rejects_duplicates() {
        let (mut pr, _) = open_pr();
        let reviewer = UserId::new();
        assert!(pr.assign_reviewers(vec![reviewer, reviewer]).is_err());
    }

    #[test]
    fn merge_sets_merged_at_once() {
        let (mut pr, _) = open_pr();
        let first = Timestamp::now();
        assert!(pr.merge(first));
        assert_eq!(pr.merged_at(), Some(first));

        let later = first.plus_minutes(5);
        assert!(!pr.merge(later));
        assert_eq!(pr.merged_at(), Some(first));
        assert_eq!(pr.status(), PullRequestStatus::Merged);
    }

    #[test]
    fn replace_reviewer_keeps_count() {
        let (mut pr, _) = open_pr();
        let (b, c, d) = (UserId::new(), UserId::new(), UserId::new());
        pr.assign_reviewers(vec![b, c]).unwrap();

        pr.replace_reviewer(&b, d).unwrap();

        assert_eq!(pr.assigned_reviewers(), &[d, c]);
    }

    #[test]
    fn replace_reviewer_rejects_unassigned_old() {
        let (mut pr, _) = open_pr();
        pr.assign_reviewers(vec![UserId::new()]).unwrap();
        assert_eq!(
            pr.replace_reviewer(&UserId::new(), UserId::new()),
            Err(ReplaceRejection::NotAssigned)
        );
    }

    #[test]
    fn replace_reviewer_rejects_author_and_existing_reviewers() {
        let (mut pr, author) = open_pr();
        let (b, c) = (UserId::new(), UserId::new());
        pr.assign_reviewers(vec![b, c]).unwrap();

        assert_eq!(pr.replace_reviewer(&b, author), Err(ReplaceRejection::Ineligible));
        assert_eq!(pr.replace_reviewer(&b, c), Err(ReplaceRejection::Ineligible));
    }

    #[test]
    fn replace_reviewer_rejects_merged() {
        let (mut pr, _) = open_pr();
        let b = UserId::new();
        pr.assign_reviewers(vec![b]).unwrap();
        pr.merge(Timestamp::now());

        assert_eq!(
            pr.replace_reviewer(&b, UserId::new()),
            Err(ReplaceRejection::Frozen)
        );
    }

    #[test]
    fn to_short_copies_listing_fields() {
        let (pr, author) = open_pr();
        let short = pr.to_short();
        assert_eq!(short.id, pr.id());
        assert_eq!(short.title, "Add login");
        assert_eq!(short.author_id, author);
        assert_eq!(short.status, PullRequestStatus::Open);
    }
}
