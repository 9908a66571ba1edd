use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::pulls::MergePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Mark a pull request as merged
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = merge_pull_request
            .run(&ctx.as_core_context(), &self.pull_request_id)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request '{}' is {}.",
            pr.id,
            pr.status
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, test_command_error, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.seed_team("core", &[("alice", true), ("bob", true)])
            .await;
        ctx.seed_pull_request("p1", "alice", &["bob"]).await;

        assert_eq!(
            test_command(ctx, &["pull-requests", "merge", "p1"]).await,
            "Pull request 'p1' is MERGED.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_unknown() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command_error(ctx, &["pull-requests", "merge", "p1"]).await,
            "Unknown pull request 'p1'"
        );

        Ok(())
    }
}
