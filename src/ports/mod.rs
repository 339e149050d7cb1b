//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Write Ports
//!
//! - `TeamRepository` - Team creation with member upsert
//! - `UserRepository` - User lookup and activation toggle
//! - `PullRequestRepository` - Pull requests and reviewer assignments
//!
//! ## Read Ports
//!
//! - `StatisticsReader` - Aggregate load statistics

mod pull_request_repository;
mod statistics_reader;
mod team_repository;
mod user_repository;

pub use pull_request_repository::PullRequestRepository;
pub use statistics_reader::StatisticsReader;
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;
