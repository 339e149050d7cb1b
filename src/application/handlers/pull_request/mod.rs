//! Pull request lifecycle handlers.

mod create_pull_request;
mod merge_pull_request;
mod reassign_reviewer;

pub use create_pull_request::{CreatePullRequestCommand, CreatePullRequestHandler};
pub use merge_pull_request::{MergePullRequestCommand, MergePullRequestHandler};
pub use reassign_reviewer::{ReassignReviewerCommand, ReassignReviewerHandler, ReassignReviewerResult};
