use std::{
    any::Any,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::{DatabaseError, Result};

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Explicit transaction scope, passed as the first argument of every store call.
///
/// Cloning shares the same underlying transaction, which lets concurrent tasks
/// work inside one unit of work. Each backend stores its own state in the handle
/// and gets it back with [`Transaction::handle`].
#[derive(Clone)]
pub struct Transaction {
    id: u64,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Transaction {
    pub fn new<H: Any + Send + Sync>(handle: H) -> Self {
        Self {
            id: NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed),
            handle: Arc::new(handle),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the backend-specific state of this transaction.
    pub fn handle<H: Any + Send + Sync>(&self) -> Result<&H> {
        self.handle
            .downcast_ref::<H>()
            .ok_or(DatabaseError::ForeignTransaction(self.id))
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction(#{})", self.id)
    }
}
