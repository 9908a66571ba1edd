use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::pulls::ReassignPullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Replace a reviewer of an open pull request
#[derive(Parser)]
pub(crate) struct PullRequestReassignCommand {
    /// Pull request ID
    pull_request_id: String,

    /// Reviewer user ID to replace
    old_reviewer_id: String,
}

#[async_trait]
impl Command for PullRequestReassignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reassign_pull_request: &dyn ReassignPullRequestInterface =
            ctx.core_module.resolve_ref();
        let reassigned = reassign_pull_request
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.old_reviewer_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer '{}' replaced by '{}' on pull request '{}'.",
            self.old_reviewer_id,
            reassigned.replaced_by,
            reassigned.pull_request.id
        )?;

        Ok(())
    }
}
