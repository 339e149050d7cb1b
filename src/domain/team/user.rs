//! User entity as seen by reviewer assignment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A user and the team they belong to.
///
/// Users are created or updated through team creation and toggled through
/// the activation operation. They are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl User {
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        team_name: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            team_name: team_name.into(),
            is_active,
        }
    }
}
