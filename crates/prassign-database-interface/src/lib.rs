mod errors;
mod interface;
mod transaction;

pub use errors::{DatabaseError, Result};
pub use interface::{DbService, PullRequestStore, ReviewerStore, TeamStore, TxManager, UserStore};
pub use transaction::Transaction;
