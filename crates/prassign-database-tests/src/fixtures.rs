use prassign_database_interface::{DbService, Result, Transaction};
use prassign_models::{PullRequest, User};
use time::macros::datetime;

pub(crate) fn user(user_id: &str, team_name: &str, is_active: bool) -> User {
    User {
        user_id: user_id.into(),
        username: format!("{user_id} name"),
        team_name: team_name.into(),
        is_active,
    }
}

pub(crate) fn pull_request(id: &str, author_id: &str) -> PullRequest {
    PullRequest::new(id, format!("{id} title"), author_id, datetime!(2024-03-01 12:00 UTC))
}

/// Create a team with the given `(user_id, is_active)` members.
pub(crate) async fn seed_team(
    db: &dyn DbService,
    tx: &Transaction,
    team_name: &str,
    members: &[(&str, bool)],
) -> Result<()> {
    db.teams_create(tx, team_name).await?;
    for (user_id, is_active) in members {
        db.users_create(tx, user(user_id, team_name, *is_active))
            .await?;
    }

    Ok(())
}
