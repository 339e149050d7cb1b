//! Statistics reader port (read side).
//!
//! Each method is an independent aggregate query; callers may run them
//! concurrently.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::statistics::{PrStats, UserAssignmentStats};

/// Read-only port for load statistics.
#[async_trait]
pub trait StatisticsReader: Send + Sync {
    /// Per-user assignment counts, ordered by total assignments descending.
    ///
    /// Users without assignments are included with zero counts.
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentStats>, DomainError>;

    /// Pull request counts by status and mean merge latency.
    async fn pr_stats(&self) -> Result<PrStats, DomainError>;

    async fn total_users(&self) -> Result<u64, DomainError>;

    async fn total_teams(&self) -> Result<u64, DomainError>;

    async fn active_users(&self) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_reader_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn StatisticsReader) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn StatisticsReader>>();
    }
}
