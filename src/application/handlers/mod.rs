//! Application handlers.
//!
//! One handler per operation. Each handler validates input, talks to the
//! persistence ports and runs under the deadline carried by its
//! `CommandMetadata`.

pub mod pull_request;
pub mod statistics;
pub mod team;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use pull_request::{
    CreatePullRequestCommand, CreatePullRequestHandler, MergePullRequestCommand,
    MergePullRequestHandler, ReassignReviewerCommand, ReassignReviewerHandler,
    ReassignReviewerResult,
};
pub use statistics::GetStatisticsHandler;
pub use team::{CreateTeamCommand, CreateTeamHandler, GetTeamHandler, GetTeamQuery};
pub use user::{GetUserReviewsHandler, GetUserReviewsQuery, SetUserActiveCommand, SetUserActiveHandler};
