use async_trait::async_trait;
use prassign_models::User;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result, TransactionCoordinator};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetUserIsActiveInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool)
        -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = SetUserIsActiveInterface)]
pub(crate) struct SetUserIsActive;

#[async_trait]
impl SetUserIsActiveInterface for SetUserIsActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
        is_active: bool,
    ) -> Result<User> {
        let user = TransactionCoordinator::run(ctx, None, |tx| async move {
            ctx.db_service
                .users_set_active(&tx, user_id, is_active)
                .await
                .map_err(DomainError::from)
        })
        .await?;

        info!(user_id = %user_id, is_active, "User activity updated");
        Ok(user)
    }
}
