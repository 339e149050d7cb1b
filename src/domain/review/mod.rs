//! Reviewer assignment rules.
//!
//! Pure building blocks used by the lifecycle handlers: validation,
//! eligibility filtering and random selection, plus the error type every
//! operation returns.

mod eligibility;
mod errors;
mod selector;
mod validator;

pub use eligibility::{eligible_reviewers, exclusions_for};
pub use errors::ReviewError;
pub use selector::{pick_uniform, shuffle_and_take, ReviewerSelector};
pub use validator::{Validator, MAX_NAME_LENGTH, REQUIRED_REVIEWERS};
