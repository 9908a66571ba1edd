use async_trait::async_trait;
use prassign_database_interface::Transaction;
use prassign_models::Team;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeactivateTeamInterface: Interface {
    /// Mark every member inactive. Open reviews are left untouched.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = DeactivateTeamInterface)]
pub(crate) struct DeactivateTeam;

#[async_trait]
impl DeactivateTeamInterface for DeactivateTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team> {
        info!(team_name = %team_name, "Attempting to deactivate team");

        let team = TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::deactivate(ctx, &tx, team_name).await
        })
        .await?;

        info!(
            team_name = %team_name,
            members = team.members.len(),
            "Team deactivated successfully"
        );
        Ok(team)
    }
}

impl DeactivateTeam {
    async fn deactivate(ctx: &CoreContext<'_>, tx: &Transaction, team_name: &str) -> Result<Team> {
        ctx.db_service
            .teams_deactivate_members(tx, team_name)
            .await?;

        Ok(ctx.db_service.teams_get_expect(tx, team_name).await?)
    }
}
