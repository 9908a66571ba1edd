use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::teams::GetTeamStatsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show team statistics
#[derive(Parser)]
pub(crate) struct TeamStatsCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamStatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_team_stats: &dyn GetTeamStatsInterface = ctx.core_module.resolve_ref();
        let stats = get_team_stats
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}': {} user(s) ({} active, {} inactive), {} pull request(s) ({} open, {} merged).",
            stats.team_name,
            stats.users,
            stats.active_users,
            stats.inactive_users,
            stats.pull_requests,
            stats.open_pull_requests,
            stats.merged_pull_requests
        )?;

        Ok(())
    }
}
