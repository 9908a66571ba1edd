//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use prassign_core::{DomainError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("{}", source)]
    DomainError {
        #[from]
        source: DomainError,
    },
}

#[derive(Debug, Serialize)]
struct ErrorDetails<'a> {
    code: &'a str,
    message: String,
}

/// Error payload shared by every route.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody<'a> {
    error: ErrorDetails<'a>,
}

impl<'a> ErrorBody<'a> {
    pub fn new(code: &'a str, message: String) -> Self {
        Self {
            error: ErrorDetails { code, message },
        }
    }
}

impl ServerError {
    fn code(&self) -> &'static str {
        match self {
            Self::IoError { .. } => ErrorKind::Internal.code(),
            Self::DomainError { source } => source.kind().code(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DomainError { source } => match source.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::TeamExists | ErrorKind::UserExists => StatusCode::BAD_REQUEST,
                ErrorKind::PullRequestExists
                | ErrorKind::MergedConflict
                | ErrorKind::NotAssigned
                | ErrorKind::NoEligibleCandidate => StatusCode::CONFLICT,
                ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!(error = ?self, "Request failed");
        }

        HttpResponse::build(status_code).json(ErrorBody::new(self.code(), self.to_string()))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
