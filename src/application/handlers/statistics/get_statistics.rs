//! GetStatisticsHandler - Query handler for the load statistics report.
//!
//! The five aggregate reads are independent and run concurrently. The first
//! failure aborts the report; no partial snapshot is returned.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::review::ReviewError;
use crate::domain::statistics::Statistics;
use crate::ports::StatisticsReader;

/// Handler for the statistics snapshot.
pub struct GetStatisticsHandler {
    statistics_reader: Arc<dyn StatisticsReader>,
}

impl GetStatisticsHandler {
    pub fn new(statistics_reader: Arc<dyn StatisticsReader>) -> Self {
        Self { statistics_reader }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<Statistics, ReviewError> {
        metadata.run_bounded(self.execute()).await?
    }

    async fn execute(&self) -> Result<Statistics, ReviewError> {
        let reader = &self.statistics_reader;
        let (user_assignments, pr_stats, total_users, total_teams, active_users) = tokio::try_join!(
            reader.user_assignment_stats(),
            reader.pr_stats(),
            reader.total_users(),
            reader.total_teams(),
            reader.active_users(),
        )?;

        tracing::debug!(
            total_prs = pr_stats.total_prs,
            total_users,
            total_teams,
            "Statistics computed"
        );

        Ok(Statistics {
            user_assignments,
            pr_stats,
            total_users,
            total_teams,
            active_users,
        })
    }
}
