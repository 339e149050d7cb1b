//! Lock-protected in-memory store implementing all persistence ports.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, Timestamp, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestShort};
use crate::domain::statistics::{sort_by_load, PrStats, UserAssignmentStats};
use crate::domain::team::{Team, TeamMember, User};
use crate::ports::{PullRequestRepository, StatisticsReader, TeamRepository, UserRepository};

#[derive(Debug, Default)]
struct State {
    teams: BTreeSet<String>,
    users: HashMap<UserId, User>,
    pull_requests: HashMap<PullRequestId, PullRequest>,
}

/// In-memory implementation of the persistence ports.
///
/// Each port call takes the lock once, so multi-row writes are atomic and
/// conditional writes see a consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    latency: Option<Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that sleeps before every call, for deadline tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: RwLock::default(),
            latency: Some(latency),
        }
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned"))
    }

    fn members_of(state: &State, team_name: &str) -> Vec<User> {
        let mut members: Vec<User> = state
            .users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.username.cmp(&b.username));
        members
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn exists(&self, team_name: &str) -> Result<bool, DomainError> {
        self.pause().await;
        Ok(self.read()?.teams.contains(team_name))
    }

    async fn create(&self, team: &Team) -> Result<(), DomainError> {
        self.pause().await;
        let mut state = self.write()?;
        if !state.teams.insert(team.team_name.clone()) {
            return Err(DomainError::new(ErrorCode::TeamExists, "Team already exists")
                .with_detail("id", team.team_name.clone()));
        }
        for member in &team.members {
            state.users.insert(
                member.user_id,
                User::new(
                    member.user_id,
                    member.username.clone(),
                    team.team_name.clone(),
                    member.is_active,
                ),
            );
        }
        Ok(())
    }

    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, DomainError> {
        self.pause().await;
        let state = self.read()?;
        if !state.teams.contains(team_name) {
            return Ok(None);
        }
        let members = Self::members_of(&state, team_name)
            .into_iter()
            .map(|u| TeamMember::new(u.user_id, u.username, u.is_active))
            .collect();
        Ok(Some(Team::new(team_name, members)))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.pause().await;
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn find_team_members(&self, team_name: &str) -> Result<Vec<User>, DomainError> {
        self.pause().await;
        let state = self.read()?;
        Ok(Self::members_of(&state, team_name))
    }

    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<(), DomainError> {
        self.pause().await;
        let mut state = self.write()?;
        let user = state.users.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("id", id.to_string())
        })?;
        user.is_active = is_active;
        Ok(())
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryStore {
    async fn exists(&self, id: &PullRequestId) -> Result<bool, DomainError> {
        self.pause().await;
        Ok(self.read()?.pull_requests.contains_key(id))
    }

    async fn create_with_reviewers(
        &self,
        pr: &PullRequest,
        reviewers: &[UserId],
    ) -> Result<(), DomainError> {
        self.pause().await;
        let mut state = self.write()?;
        if state.pull_requests.contains_key(&pr.id()) {
            return Err(
                DomainError::new(ErrorCode::PullRequestExists, "Pull request already exists")
                    .with_detail("id", pr.id().to_string()),
            );
        }
        let mut stored = pr.clone();
        stored
            .assign_reviewers(reviewers.to_vec())
            .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;
        state.pull_requests.insert(stored.id(), stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &PullRequestId) -> Result<Option<PullRequest>, DomainError> {
        self.pause().await;
        Ok(self.read()?.pull_requests.get(id).cloned())
    }

    async fn mark_merged(&self, id: &PullRequestId, merged_at: Timestamp) -> Result<bool, DomainError> {
        self.pause().await;
        let mut state = self.write()?;
        Ok(state
            .pull_requests
            .get_mut(id)
            .map(|pr| pr.merge(merged_at))
            .unwrap_or(false))
    }

    async fn replace_reviewer(
        &self,
        pr_id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), DomainError> {
        self.pause().await;
        let mut state = self.write()?;
        let replaced = state
            .pull_requests
            .get_mut(pr_id)
            .map(|pr| pr.replace_reviewer(old, *new).is_ok())
            .unwrap_or(false);
        if !replaced {
            return Err(DomainError::new(
                ErrorCode::ReviewerNotFound,
                format!("no open assignment of {} on pull request {}", old, pr_id),
            )
            .with_detail("id", pr_id.to_string()));
        }
        Ok(())
    }

    async fn find_by_reviewer(&self, user_id: &UserId) -> Result<Vec<PullRequestShort>, DomainError> {
        self.pause().await;
        let state = self.read()?;
        let mut assigned: Vec<&PullRequest> = state
            .pull_requests
            .values()
            .filter(|pr| pr.is_assigned(user_id))
            .collect();
        assigned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(assigned.into_iter().map(PullRequest::to_short).collect())
    }
}

#[async_trait]
impl StatisticsReader for InMemoryStore {
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentStats>, DomainError> {
        self.pause().await;
        let state = self.read()?;
        let mut stats: Vec<UserAssignmentStats> = state
            .users
            .values()
            .map(|user| {
                let (open, merged) = state
                    .pull_requests
                    .values()
                    .filter(|pr| pr.is_assigned(&user.user_id))
                    .fold((0u64, 0u64), |(open, merged), pr| {
                        if pr.status().is_open() {
                            (open + 1, merged)
                        } else {
                            (open, merged + 1)
                        }
                    });
                UserAssignmentStats {
                    user_id: user.user_id,
                    username: user.username.clone(),
                    team_name: user.team_name.clone(),
                    total_assignments: open + merged,
                    open_assignments: open,
                    merged_assignments: merged,
                }
            })
            .collect();
        sort_by_load(&mut stats);
        Ok(stats)
    }

    async fn pr_stats(&self) -> Result<PrStats, DomainError> {
        self.pause().await;
        let state = self.read()?;
        let total_open = state
            .pull_requests
            .values()
            .filter(|pr| pr.status().is_open())
            .count() as u64;
        let merge_hours: Vec<f64> = state
            .pull_requests
            .values()
            .filter_map(|pr| pr.merged_at().map(|at| at.hours_since(&pr.created_at())))
            .collect();
        Ok(PrStats::from_merge_hours(total_open, &merge_hours))
    }

    async fn total_users(&self) -> Result<u64, DomainError> {
        self.pause().await;
        Ok(self.read()?.users.len() as u64)
    }

    async fn total_teams(&self) -> Result<u64, DomainError> {
        self.pause().await;
        Ok(self.read()?.teams.len() as u64)
    }

    async fn active_users(&self) -> Result<u64, DomainError> {
        self.pause().await;
        Ok(self.read()?.users.values().filter(|u| u.is_active).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PullRequestStatus;

    fn team_of(name: &str, members: &[(&str, bool)]) -> Team {
        Team::new(
            name,
            members
                .iter()
                .map(|(username, active)| TeamMember::new(UserId::new(), *username, *active))
                .collect(),
        )
    }

    #[tokio::test]
    async fn create_team_rejects_duplicate_name() {
        let store = InMemoryStore::new();
        let team = team_of("backend", &[("alice", true)]);
        TeamRepository::create(&store, &team).await.unwrap();

        let err = TeamRepository::create(&store, &team).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TeamExists);
    }

    #[tokio::test]
    async fn create_team_moves_existing_users() {
        let store = InMemoryStore::new();
        let first = team_of("backend", &[("alice", true)]);
        TeamRepository::create(&store, &first).await.unwrap();

        let alice = first.members[0].user_id;
        let second = Team::new("frontend", vec![TeamMember::new(alice, "alice2", false)]);
        TeamRepository::create(&store, &second).await.unwrap();

        let user = UserRepository::find_by_id(&store, &alice).await.unwrap().unwrap();
        assert_eq!(user.team_name, "frontend");
        assert_eq!(user.username, "alice2");
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn find_by_name_orders_members_by_username() {
        let store = InMemoryStore::new();
        let team = team_of("backend", &[("carol", true), ("alice", true), ("bob", false)]);
        TeamRepository::create(&store, &team).await.unwrap();

        let found = store.find_by_name("backend").await.unwrap().unwrap();
        let names: Vec<_> = found.members.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
        assert!(store.find_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_active_unknown_user_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.set_active(&UserId::new(), false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn mark_merged_is_conditional() {
        let store = InMemoryStore::new();
        let pr = PullRequest::open(PullRequestId::new(), "Fix", UserId::new());
        store.create_with_reviewers(&pr, &[UserId::new()]).await.unwrap();

        let first = Timestamp::now();
        assert!(store.mark_merged(&pr.id(), first).await.unwrap());
        assert!(!store.mark_merged(&pr.id(), first.plus_minutes(1)).await.unwrap());

        let stored = PullRequestRepository::find_by_id(&store, &pr.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), PullRequestStatus::Merged);
        assert_eq!(stored.merged_at(), Some(first));
        assert!(!store.mark_merged(&PullRequestId::new(), first).await.unwrap());
    }

    #[tokio::test]
    async fn replace_reviewer_second_swap_of_same_row_fails() {
        let store = InMemoryStore::new();
        let (b, c, d, e) = (UserId::new(), UserId::new(), UserId::new(), UserId::new());
        let pr = PullRequest::open(PullRequestId::new(), "Fix", UserId::new());
        store.create_with_reviewers(&pr, &[b, c]).await.unwrap();

        store.replace_reviewer(&pr.id(), &b, &d).await.unwrap();
        let err = store.replace_reviewer(&pr.id(), &b, &e).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ReviewerNotFound);
        let stored = PullRequestRepository::find_by_id(&store, &pr.id()).await.unwrap().unwrap();
        assert_eq!(stored.assigned_reviewers(), &[d, c]);
    }

    #[tokio::test]
    async fn create_with_reviewers_rejects_existing_id() {
        let store = InMemoryStore::new();
        let pr = PullRequest::open(PullRequestId::new(), "Fix", UserId::new());
        store.create_with_reviewers(&pr, &[]).await.unwrap();

        let err = store.create_with_reviewers(&pr, &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PullRequestExists);
    }

    #[tokio::test]
    async fn statistics_count_assignments_by_status() {
        let store = InMemoryStore::new();
        let team = team_of("backend", &[("alice", true), ("bob", true), ("carol", false)]);
        TeamRepository::create(&store, &team).await.unwrap();
        let (alice, bob) = (team.members[0].user_id, team.members[1].user_id);

        let open = PullRequest::open(PullRequestId::new(), "One", alice);
        let merged = PullRequest::open(PullRequestId::new(), "Two", alice);
        store.create_with_reviewers(&open, &[bob]).await.unwrap();
        store.create_with_reviewers(&merged, &[bob]).await.unwrap();
        store.mark_merged(&merged.id(), Timestamp::now()).await.unwrap();

        let users = store.user_assignment_stats().await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].username, "bob");
        assert_eq!(users[0].total_assignments, 2);
        assert_eq!(users[0].open_assignments, 1);
        assert_eq!(users[0].merged_assignments, 1);

        let prs = store.pr_stats().await.unwrap();
        assert_eq!((prs.total_open, prs.total_merged, prs.total_prs), (1, 1, 2));
        assert!(prs.avg_merge_time_hours >= 0.0);

        assert_eq!(store.total_users().await.unwrap(), 3);
        assert_eq!(store.total_teams().await.unwrap(), 1);
        assert_eq!(store.active_users().await.unwrap(), 2);
    }
}
