//! Shared fixtures for handler tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::SubsecRound;

use crate::adapters::memory::InMemoryStore;
use crate::domain::foundation::{CommandMetadata, DomainError, PullRequestId, Timestamp, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestShort};
use crate::domain::team::{Team, TeamMember};
use crate::ports::{PullRequestRepository, TeamRepository};

/// Creates a team in `store` and returns member ids in the given order.
pub async fn seed_team(store: &InMemoryStore, name: &str, members: &[(&str, bool)]) -> Vec<UserId> {
    let members: Vec<TeamMember> = members
        .iter()
        .map(|(username, active)| TeamMember::new(UserId::new(), *username, *active))
        .collect();
    let ids = members.iter().map(|m| m.user_id).collect();
    TeamRepository::create(store, &Team::new(name, members))
        .await
        .expect("seeding team");
    ids
}

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub fn metadata() -> CommandMetadata {
    CommandMetadata::test_fixture()
}

pub fn tight_deadline() -> CommandMetadata {
    CommandMetadata::new(Duration::from_millis(20))
}

/// Pull request storage that keeps timestamps at microsecond precision, the
/// way a PostgreSQL `TIMESTAMPTZ` column does.
pub struct MicrosecondStore {
    inner: Arc<InMemoryStore>,
}

impl MicrosecondStore {
    pub fn new(inner: Arc<InMemoryStore>) -> Arc<Self> {
        Arc::new(Self { inner })
    }

    fn truncate(at: Timestamp) -> Timestamp {
        Timestamp::from_datetime(at.as_datetime().trunc_subsecs(6))
    }
}

#[async_trait]
impl PullRequestRepository for MicrosecondStore {
    async fn exists(&self, id: &PullRequestId) -> Result<bool, DomainError> {
        PullRequestRepository::exists(&*self.inner, id).await
    }

    async fn create_with_reviewers(
        &self,
        pr: &PullRequest,
        reviewers: &[UserId],
    ) -> Result<(), DomainError> {
        let stored = PullRequest::reconstitute(
            pr.id(),
            pr.title().to_string(),
            pr.author_id(),
            pr.status(),
            pr.assigned_reviewers().to_vec(),
            Self::truncate(pr.created_at()),
            pr.merged_at().map(Self::truncate),
        );
        self.inner.create_with_reviewers(&stored, reviewers).await
    }

    async fn find_by_id(&self, id: &PullRequestId) -> Result<Option<PullRequest>, DomainError> {
        PullRequestRepository::find_by_id(&*self.inner, id).await
    }

    async fn mark_merged(&self, id: &PullRequestId, merged_at: Timestamp) -> Result<bool, DomainError> {
        self.inner.mark_merged(id, Self::truncate(merged_at)).await
    }

    async fn replace_reviewer(
        &self,
        pr_id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), DomainError> {
        self.inner.replace_reviewer(pr_id, old, new).await
    }

    async fn find_by_reviewer(&self, user_id: &UserId) -> Result<Vec<PullRequestShort>, DomainError> {
        self.inner.find_by_reviewer(user_id).await
    }
}
