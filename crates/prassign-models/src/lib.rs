//! Domain models.

mod pull_request;
mod pull_request_status;
mod team;
mod team_stats;
mod user;

pub use pull_request::{PullRequest, ReviewerSubstitution};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use team::{Team, TeamMember};
pub use team_stats::{PullRequestCounts, TeamStats};
pub use user::User;
