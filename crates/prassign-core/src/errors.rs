//! Domain errors.

use prassign_database_interface::DatabaseError;
use thiserror::Error;

/// Domain error.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown team '{team_name}'")]
    UnknownTeam { team_name: String },

    #[error("Unknown user '{user_id}'")]
    UnknownUser { user_id: String },

    #[error("Unknown pull request '{pull_request_id}'")]
    UnknownPullRequest { pull_request_id: String },

    #[error("Team '{team_name}' already exists")]
    TeamAlreadyExists { team_name: String },

    #[error("User '{user_id}' already exists")]
    UserAlreadyExists { user_id: String },

    #[error("Pull request '{pull_request_id}' already exists")]
    PullRequestAlreadyExists { pull_request_id: String },

    #[error("Cannot reassign on merged pull request '{pull_request_id}'")]
    MergedPullRequest { pull_request_id: String },

    #[error("Reviewer '{reviewer_id}' is not assigned to pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error(
        "No active replacement candidate for reviewer '{reviewer_id}' on pull request '{pull_request_id}'"
    )]
    NoEligibleCandidate {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation deadline exceeded")]
    DeadlineExceeded,

    /// Storage failure. The source is kept for logs, the message stays generic.
    #[error("Internal error")]
    InternalError { source: DatabaseError },
}

/// Stable error kind, for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    TeamExists,
    UserExists,
    PullRequestExists,
    MergedConflict,
    NotAssigned,
    NoEligibleCandidate,
    Cancelled,
    DeadlineExceeded,
    Internal,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::UserExists => "USER_EXISTS",
            Self::PullRequestExists => "PR_EXISTS",
            Self::MergedConflict => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoEligibleCandidate => "NO_CANDIDATE",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Internal => "INTERNAL",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTeam { .. } | Self::UnknownUser { .. } | Self::UnknownPullRequest { .. } => {
                ErrorKind::NotFound
            }
            Self::TeamAlreadyExists { .. } => ErrorKind::TeamExists,
            Self::UserAlreadyExists { .. } => ErrorKind::UserExists,
            Self::PullRequestAlreadyExists { .. } => ErrorKind::PullRequestExists,
            Self::MergedPullRequest { .. } => ErrorKind::MergedConflict,
            Self::ReviewerNotAssigned { .. } => ErrorKind::NotAssigned,
            Self::NoEligibleCandidate { .. } => ErrorKind::NoEligibleCandidate,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            Self::InternalError { .. } => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownTeam(team_name) => Self::UnknownTeam { team_name },
            DatabaseError::UnknownUser(user_id) => Self::UnknownUser { user_id },
            DatabaseError::UnknownPullRequest(pull_request_id) => {
                Self::UnknownPullRequest { pull_request_id }
            }
            DatabaseError::TeamAlreadyExists(team_name) => Self::TeamAlreadyExists { team_name },
            DatabaseError::UserAlreadyExists(user_id) => Self::UserAlreadyExists { user_id },
            DatabaseError::PullRequestAlreadyExists(pull_request_id) => {
                Self::PullRequestAlreadyExists { pull_request_id }
            }
            DatabaseError::ReviewerNotAssigned(pull_request_id, reviewer_id) => {
                Self::ReviewerNotAssigned {
                    pull_request_id,
                    reviewer_id,
                }
            }
            other => Self::InternalError { source: other },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
