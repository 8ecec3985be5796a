//! Transaction error types.

use mingle_mutation::MutationError;
use thiserror::Error;

/// Transaction errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransactionError {
    /// No transaction is active.
    #[error("no transaction is active")]
    NoActiveTransaction,

    /// Transaction is already active.
    #[error("transaction already active")]
    AlreadyActive,

    /// A step failed; the transaction was rolled back.
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl TransactionError {
    /// Get the step failure, if this is one.
    pub fn as_mutation(&self) -> Option<&MutationError> {
        match self {
            Self::Mutation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;
