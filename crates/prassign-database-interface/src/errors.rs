use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Reviewer '{1}' is not assigned to pull request '{0}'")]
    ReviewerNotAssigned(String, String),

    #[error("Transaction #{0} is already closed")]
    TransactionClosed(u64),

    #[error("Transaction #{0} was opened by another storage backend")]
    ForeignTransaction(u64),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
