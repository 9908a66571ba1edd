use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::PullRequest;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{CoreContext, DomainError, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    /// Merge the pull request. Merging twice returns the first merge untouched.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::merge(ctx, &tx, pull_request_id).await
        })
        .await
    }
}

impl MergePullRequest {
    async fn merge(
        ctx: &CoreContext<'_>,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<PullRequest> {
        let pull_request = ctx
            .db_service
            .pull_requests_lock(tx, pull_request_id)
            .await?
            .ok_or_else(|| DomainError::UnknownPullRequest {
                pull_request_id: pull_request_id.into(),
            })?;

        if pull_request.is_merged() {
            return Ok(pull_request);
        }

        let now = OffsetDateTime::now_utc();
        let pull_request = ctx
            .db_service
            .pull_requests_merge(tx, pull_request_id, now.replace_nanosecond(0).unwrap_or(now))
            .await?;

        info!(pull_request_id = %pull_request_id, "Pull request merged");
        Ok(pull_request)
    }
}
