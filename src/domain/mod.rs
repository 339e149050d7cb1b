//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `team` - Teams and their users
//! - `pull_request` - Pull request aggregate and reviewer assignments
//! - `review` - Validation, eligibility and reviewer selection
//! - `statistics` - Read-only load statistics

pub mod foundation;
pub mod pull_request;
pub mod review;
pub mod statistics;
pub mod team;
