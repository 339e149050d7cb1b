//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write, query handlers only read.

pub mod handlers;

pub use handlers::{
    // Team handlers
    CreateTeamCommand, CreateTeamHandler, GetTeamHandler, GetTeamQuery,
    // User handlers
    GetUserReviewsHandler, GetUserReviewsQuery, SetUserActiveCommand, SetUserActiveHandler,
    // Pull request handlers
    CreatePullRequestCommand, CreatePullRequestHandler, MergePullRequestCommand,
    MergePullRequestHandler, ReassignReviewerCommand, ReassignReviewerHandler,
    ReassignReviewerResult,
    // Statistics
    GetStatisticsHandler,
};
