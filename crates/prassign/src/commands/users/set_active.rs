use async_trait::async_trait;
use clap::{ArgAction, Parser};
use prassign_core::use_cases::users::SetUserIsActiveInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Set the activity flag of a user
#[derive(Parser)]
pub(crate) struct UserSetActiveCommand {
    /// User ID
    user_id: String,

    /// Activity flag
    #[arg(action = ArgAction::Set)]
    is_active: bool,
}

#[async_trait]
impl Command for UserSetActiveCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let set_user_is_active: &dyn SetUserIsActiveInterface = ctx.core_module.resolve_ref();
        let user = set_user_is_active
            .run(&ctx.as_core_context(), &self.user_id, self.is_active)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "User '{}' from team '{}' is now {}.",
            user.user_id,
            user.team_name,
            if user.is_active { "active" } else { "inactive" }
        )?;

        Ok(())
    }
}
