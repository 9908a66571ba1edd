use serde::{Deserialize, Serialize};

/// Pull request counters for the authors of a team.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestCounts {
    pub total: u64,
    pub open: u64,
    pub merged: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamStats {
    pub team_name: String,
    pub users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub pull_requests: u64,
    pub open_pull_requests: u64,
    pub merged_pull_requests: u64,
}
