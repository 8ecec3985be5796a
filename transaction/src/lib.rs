//! Mingle Transaction
//!
//! All-or-nothing application of change plans.
//!
//! Responsibilities:
//! - Implement BEGIN/COMMIT/ROLLBACK over a project repository
//! - Keep the undo log of every primitive write made in the transaction
//! - Revert the log, newest first, when a step fails or the caller aborts

mod error;
mod manager;

pub use error::{TransactionError, TransactionResult};
pub use manager::{TransactionManager, TransactionState};
