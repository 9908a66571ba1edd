//! HTTP adapter over the assignment use cases.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod handlers;
mod health;
pub mod server;

pub use errors::{Result, ServerError};
