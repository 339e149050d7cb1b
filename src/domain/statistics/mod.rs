//! Read-only statistics snapshot.
//!
//! Recomputed on every request from independent aggregate reads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Pull request counts and merge latency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrStats {
    pub total_open: u64,
    pub total_merged: u64,
    pub total_prs: u64,
    /// Mean hours from creation to merge over merged PRs; zero when none.
    pub avg_merge_time_hours: f64,
}

impl PrStats {
    /// Builds stats from counts and the merge durations (in hours) of merged PRs.
    pub fn from_merge_hours(total_open: u64, merge_hours: &[f64]) -> Self {
        let total_merged = merge_hours.len() as u64;
        let avg_merge_time_hours = if merge_hours.is_empty() {
            0.0
        } else {
            merge_hours.iter().sum::<f64>() / merge_hours.len() as f64
        };
        Self {
            total_open,
            total_merged,
            total_prs: total_open + total_merged,
            avg_merge_time_hours,
        }
    }
}

/// Review load of a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAssignmentStats {
    pub user_id: UserId,
    pub username: String,
    pub team_name: String,
    pub total_assignments: u64,
    pub open_assignments: u64,
    pub merged_assignments: u64,
}

/// Sorts by total assignments descending, username as tie-breaker.
pub fn sort_by_load(stats: &mut [UserAssignmentStats]) {
    stats.sort_by(|a, b| {
        b.total_assignments
            .cmp(&a.total_assignments)
            .then_with(|| a.username.cmp(&b.username))
    });
}

/// Full statistics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub user_assignments: Vec<UserAssignmentStats>,
    pub pr_stats: PrStats,
    pub total_users: u64,
    pub total_teams: u64,
    pub active_users: u64,
}
