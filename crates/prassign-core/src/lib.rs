//! Reviewer assignment core: transaction coordination, assignment engine and use cases.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
mod scope;
mod transaction;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, ErrorKind, Result};
pub use scope::CallScope;
use shaku::module;
pub use transaction::TransactionCoordinator;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest, merge_pull_request::MergePullRequest,
        reassign_pull_request::ReassignPullRequest,
    },
    reviews::{
        assign_reviewers::AssignReviewers,
        cascade_reassign_for_deactivated_members::CascadeReassignForDeactivatedMembers,
        reassign_reviewer::ReassignReviewer,
    },
    teams::{
        add_team::AddTeam, deactivate_team::DeactivateTeam, get_team::GetTeam,
        get_team_stats::GetTeamStats,
    },
    users::{list_user_reviews::ListUserReviews, set_user_is_active::SetUserIsActive},
};

module! {
    pub CoreModule {
        components = [
            AssignReviewers, ReassignReviewer, CascadeReassignForDeactivatedMembers,
            AddTeam, GetTeam, DeactivateTeam, GetTeamStats,
            SetUserIsActive, ListUserReviews,
            CreatePullRequest, MergePullRequest, ReassignPullRequest
        ],
        providers = []
    }
}

#[cfg(test)]
mod scenarios;
