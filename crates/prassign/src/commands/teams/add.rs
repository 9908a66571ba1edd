use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::teams::AddTeamInterface;
use prassign_models::{Team, TeamMember};
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Parse a member argument, formatted as `id:username[:inactive]`.
fn parse_member(value: &str) -> std::result::Result<TeamMember, String> {
    let mut parts = value.split(':');
    let user_id = parts.next().unwrap_or_default();
    let username = parts
        .next()
        .ok_or_else(|| format!("missing username in '{value}'"))?;

    let is_active = match parts.next() {
        None => true,
        Some("inactive") => false,
        Some(flag) => return Err(format!("unknown member flag '{flag}'")),
    };

    if parts.next().is_some() {
        return Err(format!("too many fields in '{value}'"));
    }
    if user_id.is_empty() || username.is_empty() {
        return Err(format!("empty user id or username in '{value}'"));
    }

    Ok(TeamMember {
        user_id: user_id.into(),
        username: username.into(),
        is_active,
    })
}

/// Create a team with its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    team_name: String,

    /// Member, as 'id:username' or 'id:username:inactive'
    #[arg(long = "member", value_parser = parse_member)]
    members: Vec<TeamMember>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
        let team = add_team
            .run(
                &ctx.as_core_context(),
                Team {
                    team_name: self.team_name,
                    members: self.members,
                },
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with {} member(s).",
            team.team_name,
            team.members.len()
        )?;

        Ok(())
    }
}
