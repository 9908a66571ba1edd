use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::PullRequest;
use shaku::{Component, HasComponent, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{
    use_cases::reviews::AssignReviewersInterface, CoreContext, Result, TransactionCoordinator,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        info!(
            pull_request_id = %pull_request_id,
            author_id = %author_id,
            "Attempting to create pull request"
        );

        let pull_request = TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::create(ctx, &tx, pull_request_id, name, author_id).await
        })
        .await?;

        info!(
            pull_request_id = %pull_request.id,
            reviewers = ?pull_request.reviewers,
            "Pull request created successfully"
        );
        Ok(pull_request)
    }
}

impl CreatePullRequest {
    async fn create(
        ctx: &CoreContext<'_>,
        tx: &Transaction,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        // Unknown author wins over a duplicate id
        ctx.db_service.users_get_expect(tx, author_id).await?;

        let now = OffsetDateTime::now_utc();
        let created_at = now.replace_nanosecond(0).unwrap_or(now);
        ctx.db_service
            .pull_requests_create(
                tx,
                PullRequest::new(pull_request_id, name, author_id, created_at),
            )
            .await?;

        let assign_reviewers: &dyn AssignReviewersInterface = ctx.core_module.resolve_ref();
        assign_reviewers
            .run(ctx, tx, pull_request_id, author_id)
            .await?;

        Ok(ctx
            .db_service
            .pull_requests_get_expect(tx, pull_request_id)
            .await?)
    }
}
