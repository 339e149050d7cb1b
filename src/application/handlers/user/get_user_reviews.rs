//! GetUserReviewsHandler - Query handler for a reviewer's assigned pull requests.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, UserId, ValidationError};
use crate::domain::pull_request::PullRequestShort;
use crate::domain::review::ReviewError;
use crate::ports::PullRequestRepository;

/// Query for the pull requests a user reviews.
#[derive(Debug, Clone)]
pub struct GetUserReviewsQuery {
    pub user_id: UserId,
}

/// Handler for reviewer listings.
pub struct GetUserReviewsHandler {
    pull_request_repository: Arc<dyn PullRequestRepository>,
}

impl GetUserReviewsHandler {
    pub fn new(pull_request_repository: Arc<dyn PullRequestRepository>) -> Self {
        Self {
            pull_request_repository,
        }
    }

    /// Returns pull requests newest first; empty for unknown users.
    pub async fn handle(
        &self,
        query: GetUserReviewsQuery,
        metadata: CommandMetadata,
    ) -> Result<Vec<PullRequestShort>, ReviewError> {
        metadata.run_bounded(self.execute(query)).await?
    }

    async fn execute(&self, query: GetUserReviewsQuery) -> Result<Vec<PullRequestShort>, ReviewError> {
        if query.user_id.is_nil() {
            return Err(ValidationError::nil_identifier("user_id").into());
        }
        Ok(self.pull_request_repository.find_by_reviewer(&query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{metadata, store};
    use crate::domain::foundation::{PullRequestId, Timestamp};
    use crate::domain::pull_request::PullRequest;
    use uuid::Uuid;

    #[tokio::test]
    async fn lists_assigned_pull_requests_newest_first() {
        let store = store();
        let reviewer = UserId::new();
        let author = UserId::new();
        let now = Timestamp::now();
        let older = PullRequest::reconstitute(
            PullRequestId::new(),
            "Older".to_string(),
            author,
            Default::default(),
            vec![],
            now.plus_minutes(-10),
            None,
        );
        let newer = PullRequest::reconstitute(
            PullRequestId::new(),
            "Newer".to_string(),
            author,
            Default::default(),
            vec![],
            now,
            None,
        );
        let unrelated = PullRequest::open(PullRequestId::new(), "Other", author);
        store.create_with_reviewers(&older, &[reviewer]).await.unwrap();
        store.create_with_reviewers(&newer, &[reviewer]).await.unwrap();
        store.create_with_reviewers(&unrelated, &[UserId::new()]).await.unwrap();
        let handler = GetUserReviewsHandler::new(store);

        let reviews = handler
            .handle(GetUserReviewsQuery { user_id: reviewer }, metadata())
            .await
            .unwrap();

        let titles: Vec<_> = reviews.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Newer", "Older"]);
    }

    #[tokio::test]
    async fn unknown_user_has_no_reviews() {
        let handler = GetUserReviewsHandler::new(store());

        let reviews = handler
            .handle(GetUserReviewsQuery { user_id: UserId::new() }, metadata())
            .await
            .unwrap();

        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn nil_user_is_rejected() {
        let handler = GetUserReviewsHandler::new(store());

        let err = handler
            .handle(
                GetUserReviewsQuery {
                    user_id: UserId::from_uuid(Uuid::nil()),
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::Validation(_)));
    }
}
