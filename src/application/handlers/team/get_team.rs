//! GetTeamHandler - Query handler for a team and its roster.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::review::{ReviewError, Validator};
use crate::domain::team::Team;
use crate::ports::TeamRepository;

/// Query for a team by name.
#[derive(Debug, Clone)]
pub struct GetTeamQuery {
    pub team_name: String,
}

/// Handler for team lookups.
pub struct GetTeamHandler {
    team_repository: Arc<dyn TeamRepository>,
}

impl GetTeamHandler {
    pub fn new(team_repository: Arc<dyn TeamRepository>) -> Self {
        Self { team_repository }
    }

    /// Returns the team with members ordered by username.
    pub async fn handle(&self, query: GetTeamQuery, metadata: CommandMetadata) -> Result<Team, ReviewError> {
        metadata.run_bounded(self.execute(query)).await?
    }

    async fn execute(&self, query: GetTeamQuery) -> Result<Team, ReviewError> {
        Validator::validate_name(&query.team_name, "team_name")?;

        self.team_repository
            .find_by_name(&query.team_name)
            .await?
            .ok_or(ReviewError::TeamNotFound(query.team_name))
    }
}
