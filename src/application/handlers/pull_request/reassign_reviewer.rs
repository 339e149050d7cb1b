//! ReassignReviewerHandler - Command handler for replacing one reviewer.
//!
//! The replacement comes from the outgoing reviewer's team, never the author
//! and never someone already assigned. The store applies the swap only if
//! the assignment is still in place, so concurrent reassignments of the same
//! reviewer cannot both succeed.
//!
//! Team membership and active flags are read once per call and not re-checked
//! before the write.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PullRequestId, UserId, ValidationError};
use crate::domain::pull_request::PullRequest;
use crate::domain::review::{eligible_reviewers, exclusions_for, ReviewError, ReviewerSelector};
use crate::ports::{PullRequestRepository, UserRepository};

/// Command to replace a reviewer on an open pull request.
#[derive(Debug, Clone)]
pub struct ReassignReviewerCommand {
    pub pull_request_id: PullRequestId,
    pub old_reviewer_id: UserId,
}

/// Result of a successful reassignment.
#[derive(Debug, Clone)]
pub struct ReassignReviewerResult {
    /// The pull request as stored after the swap.
    pub pull_request: PullRequest,
    /// The incoming reviewer.
    pub replaced_by: UserId,
}

/// Handler for reviewer reassignment.
pub struct ReassignReviewerHandler {
    pull_request_repository: Arc<dyn PullRequestRepository>,
    user_repository: Arc<dyn UserRepository>,
    selector: Arc<ReviewerSelector>,
}

impl ReassignReviewerHandler {
    pub fn new(
        pull_request_repository: Arc<dyn PullRequestRepository>,
        user_repository: Arc<dyn UserRepository>,
        selector: Arc<ReviewerSelector>,
    ) -> Self {
        Self {
            pull_request_repository,
            user_repository,
            selector,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReassignReviewerCommand,
        metadata: CommandMetadata,
    ) -> Result<ReassignReviewerResult, ReviewError> {
        metadata.run_bounded(self.execute(cmd)).await?
    }

    async fn execute(&self, cmd: ReassignReviewerCommand) -> Result<ReassignReviewerResult, ReviewError> {
        let ReassignReviewerCommand {
            pull_request_id,
            old_reviewer_id,
        } = cmd;
        if pull_request_id.is_nil() {
            return Err(ValidationError::nil_identifier("pull_request_id").into());
        }
        if old_reviewer_id.is_nil() {
            return Err(ValidationError::nil_identifier("old_user_id").into());
        }

        // 1. Preconditions, checked in order
        let pr = self.load(&pull_request_id).await?;
        if !pr.status().is_open() {
            return Err(ReviewError::PullRequestMerged(pull_request_id));
        }
        if !pr.is_assigned(&old_reviewer_id) {
            return Err(ReviewError::NotAssigned {
                pull_request: pull_request_id,
                reviewer: old_reviewer_id,
            });
        }

        // 2. Candidates come from the outgoing reviewer's team
        let old_reviewer = self
            .user_repository
            .find_by_id(&old_reviewer_id)
            .await?
            .ok_or_else(|| ReviewError::UserNotFound(old_reviewer_id.to_string()))?;
        let members = self
            .user_repository
            .find_team_members(&old_reviewer.team_name)
            .await?;
        let candidates = eligible_reviewers(&members, &exclusions_for(&pr));

        let replacement = self.selector.pick_one(&candidates).ok_or_else(|| {
            tracing::warn!(
                pull_request_id = %pull_request_id,
                team_name = %old_reviewer.team_name,
                "No replacement candidate"
            );
            ReviewError::NoCandidate {
                team: old_reviewer.team_name.clone(),
            }
        })?;

        // 3. Conditional swap; fails if another request got there first
        self.pull_request_repository
            .replace_reviewer(&pull_request_id, &old_reviewer_id, &replacement)
            .await?;

        tracing::info!(
            pull_request_id = %pull_request_id,
            old_reviewer = %old_reviewer_id,
            new_reviewer = %replacement,
            "Reviewer reassigned"
        );

        Ok(ReassignReviewerResult {
            pull_request: self.load(&pull_request_id).await?,
            replaced_by: replacement,
        })
    }

    async fn load(&self, id: &PullRequestId) -> Result<PullRequest, ReviewError> {
        self.pull_request_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReviewError::PullRequestNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{metadata, seed_team, store};
    use crate::domain::foundation::{ErrorCode, Timestamp};

    fn handler(store: Arc<InMemoryStore>, seed: u64) -> ReassignReviewerHandler {
        ReassignReviewerHandler::new(store.clone(), store, Arc::new(ReviewerSelector::seeded(seed)))
    }

    async fn pr_with(store: &InMemoryStore, author: UserId, reviewers: &[UserId]) -> PullRequest {
        let pr = PullRequest::open(PullRequestId::new(), "Refactor", author);
        store.create_with_reviewers(&pr, reviewers).await.unwrap();
        pr
    }

    fn command(pr: &PullRequest, old: UserId) -> ReassignReviewerCommand {
        ReassignReviewerCommand {
            pull_request_id: pr.id(),
            old_reviewer_id: old,
        }
    }

    #[tokio::test]
    async fn replaces_reviewer_with_eligible_teammate() {
        let store = store();
        let ids = seed_team(
            &store,
            "backend",
            &[("a", true), ("b", true), ("c", true), ("d", true), ("e", false)],
        )
        .await;
        let (author, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        let pr = pr_with(&store, author, &[b, c]).await;

        let result = handler(store, 5).handle(command(&pr, b), metadata()).await.unwrap();

        // d is the only active member outside {author, b, c}
        assert_eq!(result.replaced_by, d);
        assert_eq!(result.pull_request.assigned_reviewers(), &[d, c]);
    }

    #[tokio::test]
    async fn merged_pull_request_is_frozen() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("a", true), ("b", true), ("c", true)]).await;
        let pr = pr_with(&store, ids[0], &[ids[1]]).await;
        store.mark_merged(&pr.id(), Timestamp::now()).await.unwrap();

        let err = handler(store.clone(), 1)
            .handle(command(&pr, ids[1]), metadata())
            .await
            .unwrap_err();

        assert_eq!(err, ReviewError::PullRequestMerged(pr.id()));
        let stored = PullRequestRepository::find_by_id(store.as_ref(), &pr.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assigned_reviewers(), &[ids[1]]);
    }

    #[tokio::test]
    async fn unassigned_reviewer_is_rejected() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("a", true), ("b", true), ("c", true)]).await;
        let pr = pr_with(&store, ids[0], &[ids[1]]).await;

        let err = handler(store, 1)
            .handle(command(&pr, ids[2]), metadata())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotAssigned);
    }

    #[tokio::test]
    async fn no_candidate_when_team_is_exhausted() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("a", true), ("b", true)]).await;
        let pr = pr_with(&store, ids[0], &[ids[1]]).await;

        let err = handler(store, 1)
            .handle(command(&pr, ids[1]), metadata())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ReviewError::NoCandidate {
                team: "backend".to_string()
            }
        );
    }

    #[tokio::test]
    async fn inactive_members_are_not_candidates() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("a", true), ("b", true), ("c", false)]).await;
        let pr = pr_with(&store, ids[0], &[ids[1]]).await;

        let err = handler(store, 1)
            .handle(command(&pr, ids[1]), metadata())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NoCandidate);
    }

    #[tokio::test]
    async fn candidates_come_from_old_reviewers_team() {
        let store = store();
        let backend = seed_team(&store, "backend", &[("a", true), ("b", true)]).await;
        let frontend = seed_team(&store, "frontend", &[("x", true), ("y", true)]).await;
        let pr = pr_with(&store, backend[0], &[frontend[0]]).await;

        let result = handler(store, 9)
            .handle(command(&pr, frontend[0]), metadata())
            .await
            .unwrap();

        assert_eq!(result.replaced_by, frontend[1]);
    }

    #[tokio::test]
    async fn unknown_pull_request_is_not_found() {
        let err = handler(store(), 1)
            .handle(
                ReassignReviewerCommand {
                    pull_request_id: PullRequestId::new(),
                    old_reviewer_id: UserId::new(),
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PullRequestNotFound);
    }

    #[tokio::test]
    async fn concurrent_reassignments_of_same_reviewer_cannot_both_win() {
        let store = store();
        let ids = seed_team(
            &store,
            "backend",
            &[("a", true), ("b", true), ("c", true), ("d", true), ("e", true)],
        )
        .await;
        let pr = pr_with(&store, ids[0], &[ids[1], ids[2]]).await;
        let first = handler(store.clone(), 1);
        let second = handler(store.clone(), 2);

        let (r1, r2) = tokio::join!(
            first.handle(command(&pr, ids[1]), metadata()),
            second.handle(command(&pr, ids[1]), metadata())
        );

        let successes = [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        let failure = r1.err().or(r2.err()).unwrap();
        assert!(matches!(
            failure.code(),
            ErrorCode::NotAssigned | ErrorCode::ReviewerNotFound
        ));

        let stored = PullRequestRepository::find_by_id(store.as_ref(), &pr.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assigned_reviewers().len(), 2);
        assert!(!stored.is_assigned(&ids[1]));
    }
}
