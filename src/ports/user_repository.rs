//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::team::User;

/// Repository port for users.
///
/// Users are created through team creation; this port only reads them and
/// toggles their active flag.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user with their team name.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// All members of a team, active or not, ordered by username.
    async fn find_team_members(&self, team_name: &str) -> Result<Vec<User>, DomainError>;

    /// Set the active flag.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no such user exists
    /// - `DatabaseError` on persistence failure
    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
