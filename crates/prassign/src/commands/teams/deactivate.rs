use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::teams::DeactivateTeamInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Deactivate every member of a team
#[derive(Parser)]
pub(crate) struct TeamDeactivateCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamDeactivateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let deactivate_team: &dyn DeactivateTeamInterface = ctx.core_module.resolve_ref();
        let team = deactivate_team
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' deactivated, {} member(s) now inactive.",
            team.team_name,
            team.inactive_members().count()
        )?;

        Ok(())
    }
}
