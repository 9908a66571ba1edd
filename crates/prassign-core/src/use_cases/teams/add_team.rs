use async_trait::async_trait;
use prassign_database_interface::{DatabaseError, Transaction};
use prassign_models::{Team, User};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AddTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = AddTeamInterface)]
pub(crate) struct AddTeam;

#[async_trait]
impl AddTeamInterface for AddTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team> {
        info!(
            team_name = %team.team_name,
            members = team.members.len(),
            "Attempting to add team"
        );

        let team = TransactionCoordinator::run(ctx, None, |tx| async move {
            Self::create_team(ctx, &tx, team).await
        })
        .await?;

        info!(team_name = %team.team_name, "Team added successfully");
        Ok(team)
    }
}

impl AddTeam {
    async fn create_team(ctx: &CoreContext<'_>, tx: &Transaction, team: Team) -> Result<Team> {
        ctx.db_service.teams_create(tx, &team.team_name).await?;

        for member in team.members {
            Self::upsert_user(ctx, tx, member.into_user(&team.team_name)).await?;
        }

        Ok(ctx
            .db_service
            .teams_get_expect(tx, &team.team_name)
            .await?)
    }

    /// Existing users are moved to the team and refreshed.
    async fn upsert_user(ctx: &CoreContext<'_>, tx: &Transaction, user: User) -> Result<User> {
        match ctx.db_service.users_create(tx, user.clone()).await {
            Ok(user) => Ok(user),
            Err(DatabaseError::UserAlreadyExists(_)) => {
                Ok(ctx.db_service.users_update(tx, user).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
