//! HTTP adapter - REST API over the application handlers.
//!
//! - `GET /health` - Liveness probe
//! - `GET /stats` - Assignment statistics
//! - `POST /team/add` - Create a team
//! - `GET /team/get` - Fetch a team
//! - `POST /users/setIsActive` - Toggle reviewer eligibility (admin token)
//! - `GET /users/getReview` - Pull requests a user reviews
//! - `POST /pullRequest/create` - Open a pull request with reviewers
//! - `POST /pullRequest/merge` - Merge a pull request
//! - `POST /pullRequest/reassign` - Replace a reviewer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::api_router;
