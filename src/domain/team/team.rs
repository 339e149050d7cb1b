//! Team entity.
//!
//! A team is a named, fixed roster of users. Membership is set once at
//! creation; there is no add/remove member operation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A member entry as supplied at team creation and returned by team lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: UserId,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    pub fn new(user_id: UserId, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_active,
        }
    }
}

/// Team with its ordered member list.
///
/// # Invariants
///
/// - `team_name` is unique across teams (enforced by persistence)
/// - member ids are unique within the team (enforced by the validator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn new(team_name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            team_name: team_name.into(),
            members,
        }
    }

    /// Returns true if the given user is on this team's roster.
    pub fn has_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| &m.user_id == user_id)
    }

    /// Number of members currently flagged active.
    pub fn active_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_member_checks_roster() {
        let alice = UserId::new();
        let team = Team::new("backend", vec![TeamMember::new(alice, "alice", true)]);

        assert!(team.has_member(&alice));
        assert!(!team.has_member(&UserId::new()));
    }

    #[test]
    fn active_count_ignores_inactive_members() {
        let team = Team::new(
            "backend",
            vec![
                TeamMember::new(UserId::new(), "alice", true),
                TeamMember::new(UserId::new(), "bob", false),
                TeamMember::new(UserId::new(), "carol", true),
            ],
        );

        assert_eq!(team.active_count(), 2);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let team = Team::new("backend", vec![]);
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["team_name"], "backend");
        assert!(json["members"].as_array().unwrap().is_empty());
    }
}
