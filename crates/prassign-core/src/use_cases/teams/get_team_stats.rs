use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::TeamStats;
use shaku::{Component, Interface};

use crate::{CoreContext, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamStatsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamStats>;
}

#[derive(Component)]
#[shaku(interface = GetTeamStatsInterface)]
pub(crate) struct GetTeamStats;

#[async_trait]
impl GetTeamStatsInterface for GetTeamStats {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamStats> {
        TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::compute(ctx, &tx, team_name).await
        })
        .await
    }
}

impl GetTeamStats {
    async fn compute(ctx: &CoreContext<'_>, tx: &Transaction, team_name: &str) -> Result<TeamStats> {
        let team = ctx.db_service.teams_get_expect(tx, team_name).await?;
        let counts = ctx
            .db_service
            .teams_pull_request_counts(tx, team_name)
            .await?;

        let users = team.members.len() as u64;
        let active_users = team.active_members().count() as u64;

        Ok(TeamStats {
            team_name: team.team_name,
            users,
            active_users,
            inactive_users: users - active_users,
            pull_requests: counts.total,
            open_pull_requests: counts.open,
            merged_pull_requests: counts.merged,
        })
    }
}
