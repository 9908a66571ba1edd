use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::reviews::CascadeReassignForDeactivatedMembersInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Move open reviews away from the inactive members of a team
#[derive(Parser)]
pub(crate) struct TeamReassignInactiveCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamReassignInactiveCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let cascade: &dyn CascadeReassignForDeactivatedMembersInterface =
            ctx.core_module.resolve_ref();
        let substitutions = cascade
            .run(&ctx.as_core_context(), None, &self.team_name)
            .await?;

        let mut writer = ctx.writer.write().await;
        if substitutions.is_empty() {
            writeln!(writer, "No reviewer reassigned on team '{}'.", self.team_name)?;
            return Ok(());
        }

        writeln!(
            writer,
            "{} reviewer(s) reassigned on team '{}':",
            substitutions.len(),
            self.team_name
        )?;
        for substitution in substitutions {
            writeln!(
                writer,
                "- {}: {} -> {}",
                substitution.pull_request_id,
                substitution.old_reviewer_id,
                substitution.new_reviewer_id
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.seed_team("core", &[("alice", true), ("bob", false), ("carol", true)])
            .await;
        ctx.seed_pull_request("p1", "alice", &["bob"]).await;

        assert_eq!(
            test_command(ctx, &["teams", "reassign-inactive", "core"]).await,
            "1 reviewer(s) reassigned on team 'core':\n- p1: bob -> carol\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_nothing_to_do() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.seed_team("core", &[("alice", true)]).await;

        assert_eq!(
            test_command(ctx, &["teams", "reassign-inactive", "core"]).await,
            "No reviewer reassigned on team 'core'.\n"
        );

        Ok(())
    }
}
