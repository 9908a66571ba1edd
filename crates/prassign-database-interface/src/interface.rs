use async_trait::async_trait;
use prassign_models::{PullRequest, PullRequestCounts, Team, User};
use time::OffsetDateTime;

use crate::{DatabaseError, Result, Transaction};

#[async_trait]
pub trait TxManager: Send + Sync {
    async fn begin(&self) -> Result<Transaction>;
    async fn commit(&self, tx: Transaction) -> Result<()>;
    async fn rollback(&self, tx: Transaction) -> Result<()>;
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn teams_create(&self, tx: &Transaction, team_name: &str) -> Result<u64>;
    async fn teams_get(&self, tx: &Transaction, team_name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, tx: &Transaction, team_name: &str) -> Result<Team> {
        self.teams_get(tx, team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(team_name.into()))
    }
    async fn teams_deactivate_members(&self, tx: &Transaction, team_name: &str) -> Result<()>;
    async fn teams_pull_request_counts(
        &self,
        tx: &Transaction,
        team_name: &str,
    ) -> Result<PullRequestCounts>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn users_create(&self, tx: &Transaction, instance: User) -> Result<User>;
    async fn users_update(&self, tx: &Transaction, instance: User) -> Result<User>;
    async fn users_get(&self, tx: &Transaction, user_id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, tx: &Transaction, user_id: &str) -> Result<User> {
        self.users_get(tx, user_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))
    }
    async fn users_set_active(&self, tx: &Transaction, user_id: &str, value: bool)
        -> Result<User>;
}

#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// Persist a new pull request. Reviewers on the instance are ignored.
    async fn pull_requests_create(
        &self,
        tx: &Transaction,
        instance: PullRequest,
    ) -> Result<PullRequest>;
    async fn pull_requests_get(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<PullRequest> {
        self.pull_requests_get(tx, pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }
    /// Same as `pull_requests_get`, but holds the pull request row until the transaction ends.
    async fn pull_requests_lock(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>>;
    async fn pull_requests_merge(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest>;
    async fn pull_requests_list_reviewing(
        &self,
        tx: &Transaction,
        user_id: &str,
    ) -> Result<Vec<PullRequest>>;
}

#[async_trait]
pub trait ReviewerStore: Send + Sync {
    async fn reviewers_list(&self, tx: &Transaction, pull_request_id: &str) -> Result<Vec<String>>;
    async fn reviewers_assign(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_ids: &[String],
    ) -> Result<()>;
    async fn reviewers_replace(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()>;
    /// Drop a reviewer without replacement. Later slots move up by one.
    async fn reviewers_remove(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_id: &str,
    ) -> Result<()>;
}

#[async_trait]
pub trait DbService: TxManager + TeamStore + UserStore + PullRequestStore + ReviewerStore {
    async fn health_check(&self) -> Result<()>;
}
