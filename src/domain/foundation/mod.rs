//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the reviewer assignment domain.

mod command;
mod errors;
mod ids;
mod pull_request_status;
mod timestamp;

pub use command::{CommandMetadata, DeadlineExceeded, DEFAULT_OPERATION_TIMEOUT};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PullRequestId, UserId};
pub use pull_request_status::PullRequestStatus;
pub use timestamp::Timestamp;
