use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::PullRequest;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::reviews::ReassignReviewerInterface, CoreContext, DomainError, Result,
    TransactionCoordinator,
};

/// Pull request after a reviewer substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignedPullRequest {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignPullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedPullRequest>;
}

#[derive(Component)]
#[shaku(interface = ReassignPullRequestInterface)]
pub(crate) struct ReassignPullRequest;

#[async_trait]
impl ReassignPullRequestInterface for ReassignPullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedPullRequest> {
        info!(
            pull_request_id = %pull_request_id,
            old_reviewer_id = %old_reviewer_id,
            "Attempting to reassign reviewer"
        );

        let reassigned = TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::reassign(ctx, &tx, pull_request_id, old_reviewer_id).await
        })
        .await?;

        info!(
            pull_request_id = %pull_request_id,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %reassigned.replaced_by,
            "Reviewer reassigned successfully"
        );
        Ok(reassigned)
    }
}

impl ReassignPullRequest {
    async fn reassign(
        ctx: &CoreContext<'_>,
        tx: &Transaction,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedPullRequest> {
        let mut pull_request = ctx
            .db_service
            .pull_requests_lock(tx, pull_request_id)
            .await?
            .ok_or_else(|| DomainError::UnknownPullRequest {
                pull_request_id: pull_request_id.into(),
            })?;

        if pull_request.is_merged() {
            return Err(DomainError::MergedPullRequest {
                pull_request_id: pull_request_id.into(),
            });
        }

        let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
        let replaced_by = reassign_reviewer
            .run(ctx, tx, pull_request_id, old_reviewer_id)
            .await?;

        pull_request.replace_reviewer(old_reviewer_id, &replaced_by);
        Ok(ReassignedPullRequest {
            pull_request,
            replaced_by,
        })
    }
}
