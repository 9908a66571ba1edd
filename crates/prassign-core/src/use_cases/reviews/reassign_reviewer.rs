use std::iter::once;

use async_trait::async_trait;
use prassign_database_interface::Transaction;
use shaku::{Component, Interface};
use tracing::info;

use super::reviewer_pool::{selection_rng, ReviewerPool};
use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    /// Replace `old_reviewer_id` on the pull request and return the new reviewer.
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &Transaction,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<String>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &Transaction,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<String> {
        let pull_request = ctx
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

        ctx.db_service.users_get_expect(tx, old_reviewer_id).await?;
        if !pull_request.has_reviewer(old_reviewer_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                reviewer_id: old_reviewer_id.into(),
            });
        }

        let author = ctx
            .db_service
            .users_get_expect(tx, &pull_request.author_id)
            .await?;
        let team = ctx
            .db_service
            .teams_get_expect(tx, &author.team_name)
            .await?;

        // Every current reviewer is out, the replaced one included.
        let excluded = once(author.user_id.as_str())
            .chain(pull_request.reviewers.iter().map(String::as_str));
        let pool = ReviewerPool::from_team(&team, excluded);

        let mut rng = selection_rng(ctx.config, pull_request_id);
        let new_reviewer_id =
            pool.pick_one(&mut rng)
                .ok_or_else(|| DomainError::NoEligibleCandidate {
                    pull_request_id: pull_request_id.into(),
                    reviewer_id: old_reviewer_id.into(),
                })?;

        ctx.db_service
            .reviewers_replace(tx, pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await?;

        info!(
            pull_request_id = %pull_request_id,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %new_reviewer_id,
            "Reassigned reviewer"
        );

        Ok(new_reviewer_id)
    }
}
