use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::{future::try_join_all, stream, StreamExt, TryStreamExt};
use prassign_database_interface::Transaction;
use prassign_models::ReviewerSubstitution;
use shaku::{Component, HasComponent, Interface};
use tracing::{info, warn};

use super::ReassignReviewerInterface;
use crate::{CoreContext, DomainError, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CascadeReassignForDeactivatedMembersInterface: Interface {
    /// Move every open review of the team's inactive members to active teammates.
    ///
    /// Runs inside `parent` when given, in its own transaction otherwise.
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        parent: Option<Transaction>,
        team_name: &str,
    ) -> Result<Vec<ReviewerSubstitution>>;
}

#[derive(Component)]
#[shaku(interface = CascadeReassignForDeactivatedMembersInterface)]
pub(crate) struct CascadeReassignForDeactivatedMembers;

#[async_trait]
impl CascadeReassignForDeactivatedMembersInterface for CascadeReassignForDeactivatedMembers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        parent: Option<Transaction>,
        team_name: &str,
    ) -> Result<Vec<ReviewerSubstitution>> {
        info!(team_name = %team_name, "Attempting to reassign reviews of inactive members");

        let substitutions = TransactionCoordinator::run(ctx, parent.as_ref(), |tx| async move {
            Self::cascade(ctx, &tx, team_name).await
        })
        .await?;

        info!(
            team_name = %team_name,
            substitutions = substitutions.len(),
            "Reassigned reviews of inactive members successfully"
        );

        Ok(substitutions)
    }
}

impl CascadeReassignForDeactivatedMembers {
    async fn cascade(
        ctx: &CoreContext<'_>,
        tx: &Transaction,
        team_name: &str,
    ) -> Result<Vec<ReviewerSubstitution>> {
        let team = ctx.db_service.teams_get_expect(tx, team_name).await?;

        let reviewing = try_join_all(team.inactive_members().map(|member| async move {
            ctx.db_service
                .pull_requests_list_reviewing(tx, &member.user_id)
                .await
                .map(|pull_requests| (member.user_id.as_str(), pull_requests))
        }))
        .await?;

        // One task per pull request, so reviewer sets are never edited concurrently.
        let mut affected: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (user_id, pull_requests) in reviewing {
            for pull_request in pull_requests.into_iter().filter(|pr| !pr.is_merged()) {
                affected
                    .entry(pull_request.id)
                    .or_default()
                    .push(user_id.to_string());
            }
        }

        let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
        let concurrency = ctx.config.assignment.cascade_max_concurrency.max(1);

        let substitutions: Vec<Vec<ReviewerSubstitution>> = stream::iter(affected)
            .map(|(pull_request_id, reviewers)| {
                Self::reassign_on_pull_request(
                    ctx,
                    reassign_reviewer,
                    tx,
                    pull_request_id,
                    reviewers,
                )
            })
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;

        Ok(substitutions.into_iter().flatten().collect())
    }

    async fn reassign_on_pull_request(
        ctx: &CoreContext<'_>,
        reassign_reviewer: &dyn ReassignReviewerInterface,
        tx: &Transaction,
        pull_request_id: String,
        reviewers: Vec<String>,
    ) -> Result<Vec<ReviewerSubstitution>> {
        let mut substitutions = Vec::with_capacity(reviewers.len());

        for old_reviewer_id in reviewers {
            match reassign_reviewer
                .run(ctx, tx, &pull_request_id, &old_reviewer_id)
                .await
            {
                Ok(new_reviewer_id) => substitutions.push(ReviewerSubstitution {
                    pull_request_id: pull_request_id.clone(),
                    old_reviewer_id,
                    new_reviewer_id,
                }),
                Err(DomainError::NoEligibleCandidate { .. }) => {
                    warn!(
                        pull_request_id = %pull_request_id,
                        reviewer_id = %old_reviewer_id,
                        "No active replacement, reviewer slot dropped"
                    );
                    ctx.db_service
                        .reviewers_remove(tx, &pull_request_id, &old_reviewer_id)
                        .await?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(substitutions)
    }
}
