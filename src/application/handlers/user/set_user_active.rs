//! SetUserActiveHandler - Command handler for toggling a user's active flag.
//!
//! Inactive users stay on their team but are never picked as reviewers.
//! Existing assignments are left untouched.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, UserId, ValidationError};
use crate::domain::review::ReviewError;
use crate::domain::team::User;
use crate::ports::UserRepository;

/// Command to activate or deactivate a user.
#[derive(Debug, Clone)]
pub struct SetUserActiveCommand {
    pub user_id: UserId,
    pub is_active: bool,
}

/// Handler for the activation toggle.
pub struct SetUserActiveHandler {
    user_repository: Arc<dyn UserRepository>,
}

impl SetUserActiveHandler {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Updates the flag and returns the stored user.
    pub async fn handle(
        &self,
        cmd: SetUserActiveCommand,
        metadata: CommandMetadata,
    ) -> Result<User, ReviewError> {
        metadata.run_bounded(self.execute(cmd)).await?
    }

    async fn execute(&self, cmd: SetUserActiveCommand) -> Result<User, ReviewError> {
        if cmd.user_id.is_nil() {
            return Err(ValidationError::nil_identifier("user_id").into());
        }

        self.user_repository.set_active(&cmd.user_id, cmd.is_active).await?;

        let user = self
            .user_repository
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| ReviewError::UserNotFound(cmd.user_id.to_string()))?;

        tracing::info!(user_id = %user.user_id, is_active = user.is_active, "User active status updated");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{metadata, seed_team, store};
    use uuid::Uuid;

    #[tokio::test]
    async fn deactivates_user() {
        let store = store();
        let ids = seed_team(&store, "backend", &[("alice", true)]).await;
        let handler = SetUserActiveHandler::new(store.clone());

        let user = handler
            .handle(
                SetUserActiveCommand {
                    user_id: ids[0],
                    is_active: false,
                },
                metadata(),
            )
            .await
            .unwrap();

        assert!(!user.is_active);
        assert_eq!(user.team_name, "backend");
        let stored = UserRepository::find_by_id(store.as_ref(), &ids[0]).await.unwrap().unwrap();
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = SetUserActiveHandler::new(store());
        let user_id = UserId::new();

        let err = handler
            .handle(
                SetUserActiveCommand {
                    user_id,
                    is_active: true,
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ReviewError::UserNotFound(user_id.to_string()));
    }

    #[tokio::test]
    async fn nil_user_is_rejected() {
        let handler = SetUserActiveHandler::new(store());

        let err = handler
            .handle(
                SetUserActiveCommand {
                    user_id: UserId::from_uuid(Uuid::nil()),
                    is_active: true,
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ReviewError::Validation(ValidationError::nil_identifier("user_id"))
        );
    }
}
