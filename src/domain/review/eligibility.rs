//! Eligibility filter: which team members may be asked to review.

use std::collections::HashSet;

use crate::domain::foundation::UserId;
use crate::domain::pull_request::PullRequest;
use crate::domain::team::User;

/// Returns the ids of members that are active and not excluded.
///
/// Input order is preserved; ordering carries no meaning until selection.
pub fn eligible_reviewers(members: &[User], excluded: &HashSet<UserId>) -> Vec<UserId> {
    members
        .iter()
        .filter(|m| m.is_active && !excluded.contains(&m.user_id))
        .map(|m| m.user_id)
        .collect()
}

/// Exclusion set for a pull request: its author plus every current reviewer.
pub fn exclusions_for(pr: &PullRequest) -> HashSet<UserId> {
    let mut excluded: HashSet<UserId> = pr.assigned_reviewers().iter().copied().collect();
    excluded.insert(pr.author_id());
    excluded
}
