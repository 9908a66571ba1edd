use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod add;
mod deactivate;
mod reassign_inactive;
mod show;
mod stats;

use self::{
    add::TeamAddCommand, deactivate::TeamDeactivateCommand,
    reassign_inactive::TeamReassignInactiveCommand, show::TeamShowCommand,
    stats::TeamStatsCommand,
};

/// Manage teams
#[derive(Parser)]
pub(crate) struct TeamCommand {
    #[clap(subcommand)]
    inner: TeamSubCommand,
}

#[async_trait]
impl Command for TeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum TeamSubCommand {
    Add(TeamAddCommand),
    Show(TeamShowCommand),
    Deactivate(TeamDeactivateCommand),
    ReassignInactive(TeamReassignInactiveCommand),
    Stats(TeamStatsCommand),
}

#[async_trait]
impl Command for TeamSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Add(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Deactivate(sub) => sub.execute(ctx).await,
            Self::ReassignInactive(sub) => sub.execute(ctx).await,
            Self::Stats(sub) => sub.execute(ctx).await,
        }
    }
}
