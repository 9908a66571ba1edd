use std::{future::Future, time::Duration};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{DomainError, Result};

/// Caller-side limits of one operation: an optional deadline and a cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CallScope {
    deadline: Option<Instant>,
    cancellation_token: CancellationToken,
}

impl CallScope {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    /// Fail fast when the scope is already over.
    pub fn check(&self) -> Result<()> {
        if self.cancellation_token.is_cancelled() {
            Err(DomainError::Cancelled)
        } else if self.deadline.map(|d| d <= Instant::now()).unwrap_or(false) {
            Err(DomainError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Drive `work` until it completes, the token is cancelled or the deadline passes.
    pub async fn guard<T, F>(&self, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => Err(DomainError::Cancelled),
            _ = deadline => Err(DomainError::DeadlineExceeded),
            result = work => result,
        }
    }
}
