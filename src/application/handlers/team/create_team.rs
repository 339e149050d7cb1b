//! CreateTeamHandler - Command handler for creating a team with its members.
//!
//! Members are upserted: a user that already exists elsewhere moves into
//! the new team.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::review::{ReviewError, Validator};
use crate::domain::team::Team;
use crate::ports::TeamRepository;

/// Command to create a team.
#[derive(Debug, Clone)]
pub struct CreateTeamCommand {
    pub team: Team,
}

/// Handler for creating teams.
pub struct CreateTeamHandler {
    team_repository: Arc<dyn TeamRepository>,
}

impl CreateTeamHandler {
    pub fn new(team_repository: Arc<dyn TeamRepository>) -> Self {
        Self { team_repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateTeamCommand,
        metadata: CommandMetadata,
    ) -> Result<Team, ReviewError> {
        let correlation_id = metadata.correlation_id();
        let result = metadata.run_bounded(self.execute(cmd)).await?;
        if let Err(err) = &result {
            tracing::warn!(correlation_id = %correlation_id, code = %err.code(), "Team creation failed: {}", err);
        }
        result
    }

    async fn execute(&self, cmd: CreateTeamCommand) -> Result<Team, ReviewError> {
        let team = cmd.team;

        // 1. Validate before touching storage
        Validator::validate_team(&team)?;

        // 2. Reject duplicate names
        if self.team_repository.exists(&team.team_name).await? {
            return Err(ReviewError::TeamExists(team.team_name));
        }

        // 3. Persist team and upsert members in one transaction
        self.team_repository.create(&team).await?;

        tracing::info!(
            team_name = %team.team_name,
            members = team.members.len(),
            "Team created"
        );

        Ok(team)
    }
}
