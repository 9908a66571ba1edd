//! Unit of work over the storage transaction manager.

use std::future::Future;

use prassign_database_interface::Transaction;
use tracing::{debug, warn};

use crate::{CoreContext, Result};

/// Runs units of work inside one storage transaction.
pub struct TransactionCoordinator;

impl TransactionCoordinator {
    /// Execute `work` inside a transaction.
    ///
    /// With a `parent` scope the work joins it and the outermost caller decides the outcome.
    /// Otherwise a new transaction is opened, committed when `work` succeeds and rolled back
    /// on error, cancellation or deadline. A panicking unit of work drops the transaction,
    /// which discards it as well.
    pub async fn run<'a, T, F, Fut>(
        ctx: &CoreContext<'a>,
        parent: Option<&Transaction>,
        work: F,
    ) -> Result<T>
    where
        F: FnOnce(Transaction) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        ctx.call_scope.check()?;

        if let Some(parent) = parent {
            return work(parent.clone()).await;
        }

        let tx = ctx.db_service.begin().await?;
        debug!(transaction = ?tx, "Transaction opened");

        match ctx.call_scope.guard(work(tx.clone())).await {
            Ok(value) => {
                let id = tx.id();
                ctx.db_service.commit(tx).await?;
                debug!(transaction_id = id, "Transaction committed");
                Ok(value)
            }
            Err(e) => {
                let id = tx.id();
                if let Err(rollback_error) = ctx.db_service.rollback(tx).await {
                    warn!(
                        transaction_id = id,
                        error = %rollback_error,
                        "Could not roll back transaction"
                    );
                } else {
                    debug!(transaction_id = id, error = %e, "Transaction rolled back");
                }

                Err(e)
            }
        }
    }
}
