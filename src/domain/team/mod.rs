//! Team domain module.
//!
//! Teams own a fixed roster of users. Reviewers are always drawn from the
//! roster of a relevant team.

mod team;
mod user;

pub use team::{Team, TeamMember};
pub use user::User;
