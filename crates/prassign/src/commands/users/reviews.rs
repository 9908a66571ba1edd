use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::users::ListUserReviewsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests a user is reviewing
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User ID
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list_user_reviews
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "User '{}' has no review.", self.user_id)?;
            return Ok(());
        }

        writeln!(writer, "Reviews of user '{}':", self.user_id)?;
        for pr in pull_requests {
            writeln!(
                writer,
                "- {} '{}' by {} [{}]",
                pr.id, pr.name, pr.author_id, pr.status
            )?;
        }

        Ok(())
    }
}
