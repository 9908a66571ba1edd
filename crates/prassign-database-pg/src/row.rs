use prassign_models::{PullRequest, TeamMember, User};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct UserRow(User);
pub(crate) struct TeamMemberRow(TeamMember);
pub(crate) struct PullRequestRow(PullRequest);

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<TeamMemberRow> for TeamMember {
    fn from(r: TeamMemberRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            team_name: row.try_get("team_name")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for TeamMemberRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(TeamMember {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
            // Filled from the reviewer table.
            reviewers: vec![],
            created_at: row.try_get("created_at")?,
            merged_at: row.try_get("merged_at")?,
        }))
    }
}
