//! CreatePullRequestHandler - Command handler for opening a pull request.
//!
//! Two reviewers are drawn at random from the author's active teammates.
//! The pull request row and both assignment rows are written atomically.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PullRequestId, UserId};
use crate::domain::pull_request::PullRequest;
use crate::domain::review::{
    eligible_reviewers, ReviewError, ReviewerSelector, Validator, REQUIRED_REVIEWERS,
};
use crate::ports::{PullRequestRepository, UserRepository};

/// Command to open a pull request.
#[derive(Debug, Clone)]
pub struct CreatePullRequestCommand {
    pub pull_request_id: PullRequestId,
    pub title: String,
    pub author_id: UserId,
}

/// Handler for pull request creation.
pub struct CreatePullRequestHandler {
    pull_request_repository: Arc<dyn PullRequestRepository>,
    user_repository: Arc<dyn UserRepository>,
    selector: Arc<ReviewerSelector>,
}

impl CreatePullRequestHandler {
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

    /// Opens the pull request and returns it with its reviewers.
    pub async fn handle(
        &self,
        cmd: CreatePullRequestCommand,
        metadata: CommandMetadata,
    ) -> Result<PullRequest, ReviewError> {
        metadata.run_bounded(self.execute(cmd)).await?
    }

    async fn execute(&self, cmd: CreatePullRequestCommand) -> Result<PullRequest, ReviewError> {
        // 1. Validate the new aggregate
        let mut pr = PullRequest::open(cmd.pull_request_id, cmd.title, cmd.author_id);
        Validator::validate_pull_request(&pr)?;

        // 2. Reject reused ids
        if self.pull_request_repository.exists(&pr.id()).await? {
            return Err(ReviewError::PullRequestExists(pr.id().to_string()));
        }

        // 3. Resolve the author's team
        let author = self
            .user_repository
            .find_by_id(&cmd.author_id)
            .await?
            .ok_or_else(|| ReviewError::UserNotFound(cmd.author_id.to_string()))?;
        let members = self.user_repository.find_team_members(&author.team_name).await?;

        // 4. Pick reviewers among active teammates
        let excluded = HashSet::from([author.user_id]);
        let candidates = eligible_reviewers(&members, &excluded);
        let reviewers = self.selector.select(candidates, REQUIRED_REVIEWERS);

        if let Err(err) = Validator::validate_reviewer_count(&reviewers) {
            tracing::warn!(
                pull_request_id = %pr.id(),
                team_name = %author.team_name,
                available = reviewers.len(),
                "Not enough eligible reviewers"
            );
            return Err(err.into());
        }

        // 5. Persist pull request and assignments together
        pr.assign_reviewers(reviewers)?;
        self.pull_request_repository
            .create_with_reviewers(&pr, pr.assigned_reviewers())
            .await?;

        tracing::info!(
            pull_request_id = %pr.id(),
            author_id = %pr.author_id(),
            reviewers = pr.assigned_reviewers().len(),
            "Pull request created"
        );

        Ok(pr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{metadata, seed_team, store, MicrosecondStore};
    use crate::domain::foundation::{ErrorCode, PullRequestStatus, ValidationError};

    fn command(author_id: UserId) -> CreatePullRequestCommand {
        CreatePullRequestCommand {
            pull_request_id: PullRequestId::new(),
            title: "Add search".to_string(),
            author_id,
        }
    }

    fn handler(store: Arc<crate::adapters::memory::InMemoryStore>, seed: u64) -> CreatePullRequestHandler {
        CreatePullRequestHandler::new(store.clone(), store, Arc::new(ReviewerSelector::seeded(seed)))
    }

    #[tokio::test]
    async fn returned_creation_time_matches_the_stored_row() {
        let inner = store();
        let ids = seed_team(&inner, "backend", &[("alice", true), ("bob", true), ("carol", true)]).await;
        let handler = CreatePullRequestHandler::new(
            MicrosecondStore::new(inner.clone()),
            inner.clone(),
            Arc::new(ReviewerSelector::seeded(7)),
        );

        for _ in 0..20 {
            let created = handler.handle(command(ids[0]), metadata()).await.unwrap();
            let stored = PullRequestRepository::find_by_id(&*inner, &created.id())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(created.created_at(), stored.created_at());
        }
    }

    #[tokio::test]
    async fn assigns_two_active_teammates_never_the_author() {
        let store = store();
        let ids = seed_team(
            &store,
            "backend",
            &[("alice", true), ("bob", true), ("carol", true), ("dave", false)],
        )
        .await;
        let (author, inactive) = (ids[0], ids[3]);

        for seed in 0..20 {
            let pr = handler(store.clone(), seed)
                .handle(command(author), metadata())
                .await
                .unwrap();

            let reviewers = pr.assigned_reviewers();
            assert_eq!(reviewers.len(), 2);
            assert_ne!(reviewers[0], reviewers[1]);
            assert!(!reviewers.contains(&author));
            assert!(!reviewers.contains(&inactive));
            assert_eq!(pr.status(), PullRequestStatus::Open);
        }
    }

    #[tokio::test]
    async fn persists_pull_request_with_reviewers() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("alice", true), ("bob", true), ("carol", true)]).await;

        let created = handler(store.clone(), 1)
            .handle(command(ids[0]), metadata())
            .await
            .unwrap();

        let stored = PullRequestRepository::find_by_id(store.as_ref(), &created.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assigned_reviewers(), created.assigned_reviewers());
    }

    #[tokio::test]
    async fn same_seed_assigns_same_reviewers() {
        let store = store();
        let ids = seed_team(
            &store,
            "backend",
            &[("a", true), ("b", true), ("c", true), ("d", true), ("e", true)],
        )
        .await;

        let first = handler(store.clone(), 42).handle(command(ids[0]), metadata()).await.unwrap();
        let second = handler(store.clone(), 42).handle(command(ids[0]), metadata()).await.unwrap();

        assert_eq!(first.assigned_reviewers(), second.assigned_reviewers());
    }

    #[tokio::test]
    async fn single_candidate_fails_validation_and_writes_nothing() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("alice", true), ("bob", true), ("carol", false)]).await;
        let cmd = command(ids[0]);
        let pr_id = cmd.pull_request_id;

        let err = handler(store.clone(), 3).handle(cmd, metadata()).await.unwrap_err();

        assert_eq!(
            err,
            ReviewError::Validation(ValidationError::ReviewerCount {
                expected: 2,
                actual: 1
            })
        );
        assert!(!PullRequestRepository::exists(store.as_ref(), &pr_id).await.unwrap());
    }

    #[tokio::test]
    async fn reused_id_is_rejected() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("alice", true), ("bob", true), ("carol", true)]).await;
        let cmd = command(ids[0]);
        handler(store.clone(), 1).handle(cmd.clone(), metadata()).await.unwrap();

        let err = handler(store, 1).handle(cmd.clone(), metadata()).await.unwrap_err();

        assert_eq!(err, ReviewError::PullRequestExists(cmd.pull_request_id.to_string()));
    }

    #[tokio::test]
    async fn unknown_author_is_not_found() {
        let author = UserId::new();
        let err = handler(store(), 1).handle(command(author), metadata()).await.unwrap_err();
        assert_eq!(err, ReviewError::UserNotFound(author.to_string()));
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_lookup() {
        let mut cmd = command(UserId::new());
        cmd.title = "  ".to_string();

        let err = handler(store(), 1).handle(cmd, metadata()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
