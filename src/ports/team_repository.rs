//! Team repository port.
//!
//! Teams are created once with their full roster and never modified.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::team::Team;

/// Repository port for teams and their rosters.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Check whether a team with this name exists.
    async fn exists(&self, team_name: &str) -> Result<bool, DomainError>;

    /// Create the team and upsert every member, atomically.
    ///
    /// Members that already exist are moved into this team with the given
    /// username and active flag.
    ///
    /// # Errors
    ///
    /// - `TeamExists` if the name is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, team: &Team) -> Result<(), DomainError>;

    /// Find a team with its members ordered by username.
    ///
    /// Returns `None` if not found.
    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn team_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TeamRepository) {}
    }
}
