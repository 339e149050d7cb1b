//! Team command and query handlers.

mod create_team;
mod get_team;

pub use create_team::{CreateTeamCommand, CreateTeamHandler};
pub use get_team::{GetTeamHandler, GetTeamQuery};
