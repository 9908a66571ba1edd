use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use prassign_database_interface::{
    DatabaseError, DbService, PullRequestStore, Result, ReviewerStore, TeamStore, Transaction,
    TxManager, UserStore,
};
use prassign_models::{
    PullRequest, PullRequestCounts, PullRequestStatus, Team, TeamMember, User,
};
use time::OffsetDateTime;
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Default, Clone)]
struct MemoryState {
    teams: HashMap<String, u64>,
    users: HashMap<String, User>,
    pull_requests: HashMap<String, PullRequest>,
    reviewers: HashMap<String, Vec<String>>,
}

impl MemoryState {
    fn pull_request_with_reviewers(&self, pull_request_id: &str) -> Option<PullRequest> {
        self.pull_requests.get(pull_request_id).map(|pr| {
            let mut pr = pr.clone();
            pr.reviewers = self
                .reviewers
                .get(pull_request_id)
                .cloned()
                .unwrap_or_default();
            pr
        })
    }

    fn ensure_team(&self, team_name: &str) -> Result<()> {
        if self.teams.contains_key(team_name) {
            Ok(())
        } else {
            Err(DatabaseError::UnknownTeam(team_name.into()))
        }
    }

    fn ensure_user(&self, user_id: &str) -> Result<()> {
        if self.users.contains_key(user_id) {
            Ok(())
        } else {
            Err(DatabaseError::UnknownUser(user_id.into()))
        }
    }

    fn ensure_pull_request(&self, pull_request_id: &str) -> Result<()> {
        if self.pull_requests.contains_key(pull_request_id) {
            Ok(())
        } else {
            Err(DatabaseError::UnknownPullRequest(pull_request_id.into()))
        }
    }
}

/// Transaction state: the committed state stays locked until commit or rollback,
/// statements work on a private copy.
struct MemoryTransaction {
    committed: Mutex<Option<OwnedMutexGuard<MemoryState>>>,
    working: Mutex<MemoryState>,
}

/// In-memory storage with serializable transactions.
#[derive(Debug, Default)]
pub struct MemoryDb {
    state: Arc<tokio::sync::Mutex<MemoryState>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn working(tx: &Transaction) -> Result<MutexGuard<'_, MemoryState>> {
        let handle = tx.handle::<MemoryTransaction>()?;
        if handle
            .committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
        {
            return Err(DatabaseError::TransactionClosed(tx.id()));
        }

        Ok(handle.working.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn close(tx: &Transaction) -> Result<(OwnedMutexGuard<MemoryState>, MemoryState)> {
        let handle = tx.handle::<MemoryTransaction>()?;
        let committed = handle
            .committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(DatabaseError::TransactionClosed(tx.id()))?;
        let mut guard = handle
            .working
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let working = std::mem::take(&mut *guard);

        Ok((committed, working))
    }
}

#[async_trait]
impl TxManager for MemoryDb {
    async fn begin(&self) -> Result<Transaction> {
        let committed = self.state.clone().lock_owned().await;
        let working = committed.clone();

        Ok(Transaction::new(MemoryTransaction {
            committed: Mutex::new(Some(committed)),
            working: Mutex::new(working),
        }))
    }

    async fn commit(&self, tx: Transaction) -> Result<()> {
        let (mut committed, working) = Self::close(&tx)?;
        *committed = working;
        Ok(())
    }

    async fn rollback(&self, tx: Transaction) -> Result<()> {
        Self::close(&tx).map(|_| ())
    }
}

//////////////////
// Teams

#[async_trait]
impl TeamStore for MemoryDb {
    async fn teams_create(&self, tx: &Transaction, team_name: &str) -> Result<u64> {
        let mut state = Self::working(tx)?;
        if state.teams.contains_key(team_name) {
            return Err(DatabaseError::TeamAlreadyExists(team_name.into()));
        }

        let id = state.teams.values().max().copied().unwrap_or(0) + 1;
        state.teams.insert(team_name.into(), id);
        Ok(id)
    }

    async fn teams_get(&self, tx: &Transaction, team_name: &str) -> Result<Option<Team>> {
        let state = Self::working(tx)?;
        if !state.teams.contains_key(team_name) {
            return Ok(None);
        }

        let mut members: Vec<_> = state
            .users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .map(TeamMember::from)
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Ok(Some(Team {
            team_name: team_name.into(),
            members,
        }))
    }

    async fn teams_deactivate_members(&self, tx: &Transaction, team_name: &str) -> Result<()> {
        let mut state = Self::working(tx)?;
        state.ensure_team(team_name)?;

        for user in state.users.values_mut() {
            if user.team_name == team_name {
                user.is_active = false;
            }
        }

        Ok(())
    }

    async fn teams_pull_request_counts(
        &self,
        tx: &Transaction,
        team_name: &str,
    ) -> Result<PullRequestCounts> {
        let state = Self::working(tx)?;
        state.ensure_team(team_name)?;

        let mut counts = PullRequestCounts::default();
        for pr in state.pull_requests.values() {
            let from_team = state
                .users
                .get(&pr.author_id)
                .map(|u| u.team_name == team_name)
                .unwrap_or(false);

            if from_team {
                counts.total += 1;
                match pr.status {
                    PullRequestStatus::Open => counts.open += 1,
                    PullRequestStatus::Merged => counts.merged += 1,
                }
            }
        }

        Ok(counts)
    }
}

//////////////////
// Users

#[async_trait]
impl UserStore for MemoryDb {
    async fn users_create(&self, tx: &Transaction, instance: User) -> Result<User> {
        let mut state = Self::working(tx)?;
        state.ensure_team(&instance.team_name)?;
        if state.users.contains_key(&instance.user_id) {
            return Err(DatabaseError::UserAlreadyExists(instance.user_id));
        }

        state
            .users
            .insert(instance.user_id.clone(), instance.clone());
        Ok(instance)
    }

    async fn users_update(&self, tx: &Transaction, instance: User) -> Result<User> {
        let mut state = Self::working(tx)?;
        state.ensure_team(&instance.team_name)?;
        state.ensure_user(&instance.user_id)?;

        state
            .users
            .insert(instance.user_id.clone(), instance.clone());
        Ok(instance)
    }

    async fn users_get(&self, tx: &Transaction, user_id: &str) -> Result<Option<User>> {
        Ok(Self::working(tx)?.users.get(user_id).cloned())
    }

    async fn users_set_active(
        &self,
        tx: &Transaction,
        user_id: &str,
        value: bool,
    ) -> Result<User> {
        let mut state = Self::working(tx)?;
        match state.users.get_mut(user_id) {
            Some(user) => {
                user.is_active = value;
                Ok(user.clone())
            }
            None => Err(DatabaseError::UnknownUser(user_id.into())),
        }
    }
}

//////////////////
// Pull requests

#[async_trait]
impl PullRequestStore for MemoryDb {
    async fn pull_requests_create(
        &self,
        tx: &Transaction,
        mut instance: PullRequest,
    ) -> Result<PullRequest> {
        let mut state = Self::working(tx)?;
        state.ensure_user(&instance.author_id)?;
        if state.pull_requests.contains_key(&instance.id) {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }

        instance.reviewers.clear();
        state
            .pull_requests
            .insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>> {
        Ok(Self::working(tx)?.pull_request_with_reviewers(pull_request_id))
    }

    async fn pull_requests_lock(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>> {
        // The whole state is already owned by the transaction.
        self.pull_requests_get(tx, pull_request_id).await
    }

    async fn pull_requests_merge(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        let mut state = Self::working(tx)?;
        match state.pull_requests.get_mut(pull_request_id) {
            Some(pr) if pr.status == PullRequestStatus::Open => {
                pr.status = PullRequestStatus::Merged;
                pr.merged_at = Some(merged_at);
            }
            Some(_) => (),
            None => return Err(DatabaseError::UnknownPullRequest(pull_request_id.into())),
        }

        state
            .pull_request_with_reviewers(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    async fn pull_requests_list_reviewing(
        &self,
        tx: &Transaction,
        user_id: &str,
    ) -> Result<Vec<PullRequest>> {
        let state = Self::working(tx)?;
        let mut values: Vec<_> = state
            .reviewers
            .iter()
            .filter(|(_, reviewers)| reviewers.iter().any(|r| r == user_id))
            .filter_map(|(pr_id, _)| state.pull_request_with_reviewers(pr_id))
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(values)
    }
}

//////////////////
// Reviewers

#[async_trait]
impl ReviewerStore for MemoryDb {
    async fn reviewers_list(&self, tx: &Transaction, pull_request_id: &str) -> Result<Vec<String>> {
        Ok(Self::working(tx)?
            .reviewers
            .get(pull_request_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn reviewers_assign(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_ids: &[String],
    ) -> Result<()> {
        let mut state = Self::working(tx)?;
        state.ensure_pull_request(pull_request_id)?;
        for user_id in user_ids {
            state.ensure_user(user_id)?;
        }

        let reviewers = state.reviewers.entry(pull_request_id.into()).or_default();
        for user_id in user_ids {
            if !reviewers.contains(user_id) {
                reviewers.push(user_id.clone());
            }
        }

        Ok(())
    }

    async fn reviewers_replace(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()> {
        let mut state = Self::working(tx)?;
        state.ensure_pull_request(pull_request_id)?;
        state.ensure_user(new_user_id)?;

        let slot = state
            .reviewers
            .get_mut(pull_request_id)
            .and_then(|reviewers| reviewers.iter_mut().find(|r| *r == old_user_id));

        match slot {
            Some(slot) => {
                *slot = new_user_id.into();
                Ok(())
            }
            None => Err(DatabaseError::ReviewerNotAssigned(
                pull_request_id.into(),
                old_user_id.into(),
            )),
        }
    }

    async fn reviewers_remove(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_id: &str,
    ) -> Result<()> {
        let mut state = Self::working(tx)?;
        state.ensure_pull_request(pull_request_id)?;

        let reviewers = state.reviewers.entry(pull_request_id.into()).or_default();
        match reviewers.iter().position(|r| r == user_id) {
            Some(index) => {
                reviewers.remove(index);
                Ok(())
            }
            None => Err(DatabaseError::ReviewerNotAssigned(
                pull_request_id.into(),
                user_id.into(),
            )),
        }
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn commit_publishes_changes() {
        let db = MemoryDb::new();

        let tx = db.begin().await.unwrap();
        db.teams_create(&tx, "core").await.unwrap();
        db.commit(tx).await.unwrap();

        let tx = db.begin().await.unwrap();
        assert!(db.teams_get(&tx, "core").await.unwrap().is_some());
        db.rollback(tx).await.unwrap();
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() {
        let db = MemoryDb::new();

        {
            let tx = db.begin().await.unwrap();
            db.teams_create(&tx, "core").await.unwrap();
        }

        let tx = db.begin().await.unwrap();
        assert_eq!(db.teams_get(&tx, "core").await.unwrap(), None);
        db.rollback(tx).await.unwrap();
    }

    #[tokio::test]
    async fn closed_transaction_is_rejected() {
        let db = MemoryDb::new();

        let tx = db.begin().await.unwrap();
        let leaked = tx.clone();
        db.commit(tx).await.unwrap();

        assert!(matches!(
            db.teams_create(&leaked, "core").await,
            Err(DatabaseError::TransactionClosed(_))
        ));
        assert!(matches!(
            db.rollback(leaked).await,
            Err(DatabaseError::TransactionClosed(_))
        ));
    }

    #[tokio::test]
    async fn transactions_are_serialized() {
        let db = Arc::new(MemoryDb::new());

        let tx = db.begin().await.unwrap();
        db.teams_create(&tx, "core").await.unwrap();

        let waiter = {
            let db = db.clone();
            tokio::spawn(async move {
                let tx = db.begin().await.unwrap();
                let team = db.teams_get(&tx, "core").await.unwrap();
                db.rollback(tx).await.unwrap();
                team
            })
        };

        tokio::task::yield_now().await;
        db.commit(tx).await.unwrap();

        assert!(waiter.await.unwrap().is_some());
    }
}
