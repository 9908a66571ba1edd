use async_trait::async_trait;
use prassign_database_interface::Transaction;
use shaku::{Component, Interface};
use tracing::info;

use super::reviewer_pool::{selection_rng, ReviewerPool, REVIEWERS_TARGET_COUNT};
use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AssignReviewersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &Transaction,
        pull_request_id: &str,
        author_id: &str,
    ) -> Result<Vec<String>>;
}

#[derive(Component)]
#[shaku(interface = AssignReviewersInterface)]
pub(crate) struct AssignReviewers;

#[async_trait]
impl AssignReviewersInterface for AssignReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &Transaction,
        pull_request_id: &str,
        author_id: &str,
    ) -> Result<Vec<String>> {
        let author = ctx.db_service.users_get_expect(tx, author_id).await?;
        let team = ctx
            .db_service
            .teams_get_expect(tx, &author.team_name)
            .await?;

        let pool = ReviewerPool::from_team(&team, [author_id]);
        let mut rng = selection_rng(ctx.config, pull_request_id);
        let reviewers = pool.pick_many(&mut rng, REVIEWERS_TARGET_COUNT);

        if !reviewers.is_empty() {
            ctx.db_service
                .reviewers_assign(tx, pull_request_id, &reviewers)
                .await?;
        }

        info!(
            pull_request_id = %pull_request_id,
            team_name = %team.team_name,
            reviewers = ?reviewers,
            "Assigned reviewers"
        );

        Ok(reviewers)
    }
}
