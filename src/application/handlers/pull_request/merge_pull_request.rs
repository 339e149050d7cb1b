//! MergePullRequestHandler - Command handler for merging a pull request.
//!
//! Merging is idempotent: an already-merged pull request is returned as is
//! and its merge time is never rewritten.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PullRequestId, Timestamp, ValidationError};
use crate::domain::pull_request::PullRequest;
use crate::domain::review::ReviewError;
use crate::ports::PullRequestRepository;

/// Command to merge a pull request.
#[derive(Debug, Clone)]
pub struct MergePullRequestCommand {
    pub pull_request_id: PullRequestId,
}

/// Handler for merges.
pub struct MergePullRequestHandler {
    pull_request_repository: Arc<dyn PullRequestRepository>,
}

impl MergePullRequestHandler {
    pub fn new(pull_request_repository: Arc<dyn PullRequestRepository>) -> Self {
        Self {
            pull_request_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: MergePullRequestCommand,
        metadata: CommandMetadata,
    ) -> Result<PullRequest, ReviewError> {
        metadata.run_bounded(self.execute(cmd)).await?
    }

    async fn execute(&self, cmd: MergePullRequestCommand) -> Result<PullRequest, ReviewError> {
        let id = cmd.pull_request_id;
        if id.is_nil() {
            return Err(ValidationError::nil_identifier("pull_request_id").into());
        }

        let mut pr = self.load(&id).await?;
        if !pr.status().is_open() {
            tracing::info!(pull_request_id = %id, "Pull request already merged");
            return Ok(pr);
        }

        let merged_at = Timestamp::now();
        if self.pull_request_repository.mark_merged(&id, merged_at).await? {
            pr.merge(merged_at);
            tracing::info!(pull_request_id = %id, "Pull request merged");
            return Ok(pr);
        }

        // Another request merged it first; report the stored state.
        tracing::debug!(pull_request_id = %id, "Merge lost race, re-reading");
        self.load(&id).await
    }

    async fn load(&self, id: &PullRequestId) -> Result<PullRequest, ReviewError> {
        self.pull_request_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReviewError::PullRequestNotFound(id.to_string()))
    }
}
