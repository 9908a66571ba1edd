use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::PullRequestStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    pub id: String,
    #[serde(rename = "pull_request_name")]
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// Reviewer ids, in assignment slot order.
    #[serde(rename = "assigned_reviewers")]
    pub reviewers: Vec<String>,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "mergedAt", default, with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
}

impl PullRequest {
    /// Build a fresh open pull request without reviewers.
    pub fn new<I: Into<String>, N: Into<String>, A: Into<String>>(
        id: I,
        name: N,
        author_id: A,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
            status: PullRequestStatus::Open,
            reviewers: vec![],
            created_at,
            merged_at: None,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }

    /// Swap a reviewer in place, keeping its slot.
    pub fn replace_reviewer(&mut self, old_reviewer_id: &str, new_reviewer_id: &str) -> bool {
        match self.reviewers.iter_mut().find(|r| *r == old_reviewer_id) {
            Some(slot) => {
                *slot = new_reviewer_id.into();
                true
            }
            None => false,
        }
    }
}

/// One reviewer replaced by another on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReviewerSubstitution {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
    pub new_reviewer_id: String,
}
