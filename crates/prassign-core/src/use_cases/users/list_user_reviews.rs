use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewsInterface: Interface {
    /// Pull requests the user currently reviews, any status.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = ListUserReviewsInterface)]
pub(crate) struct ListUserReviews;

#[async_trait]
impl ListUserReviewsInterface for ListUserReviews {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>> {
        TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::list(ctx, &tx, user_id).await
        })
        .await
    }
}

impl ListUserReviews {
    async fn list(
        ctx: &CoreContext<'_>,
        tx: &Transaction,
        user_id: &str,
    ) -> Result<Vec<PullRequest>> {
        ctx.db_service.users_get_expect(tx, user_id).await?;

        Ok(ctx
            .db_service
            .pull_requests_list_reviewing(tx, user_id)
            .await?)
    }
}
