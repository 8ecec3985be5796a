//! Session error types.

use mingle_analyzer::FormulaError;
use mingle_dependency::DependencyError;
use mingle_registry::RegistryError;
use mingle_transaction::TransactionError;
use thiserror::Error;

use crate::ChangeState;

/// Session errors.
///
/// Every variant but `Config` is recovered into a change response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// Name rules, unknown ids, or a schema rule such as the last card type.
    #[error(transparent)]
    Validation(#[from] RegistryError),

    /// The formula does not parse or does not type check.
    #[error(transparent)]
    FormulaSemantic(#[from] FormulaError),

    /// The request does not make sense for this property.
    #[error("{message}")]
    InvalidRequest { message: String },

    /// At least one dependent forbids the change.
    #[error("change blocked: {}", .messages.join(" "))]
    BlockingDependency { messages: Vec<String> },

    /// The change has consequences the user has not confirmed.
    #[error("confirmation required: {}", .warnings.join(" "))]
    ConfirmationRequired { warnings: Vec<String> },

    /// Applying the change failed; nothing was kept.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("invalid change state transition from {from:?} to {to:?}")]
    InvalidTransition { from: ChangeState, to: ChangeState },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl SessionError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn blocking(messages: Vec<String>) -> Self {
        Self::BlockingDependency { messages }
    }

    pub fn confirmation_required(warnings: Vec<String>) -> Self {
        Self::ConfirmationRequired { warnings }
    }

    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Whether the request itself is wrong, as opposed to blocked or failed.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::FormulaSemantic(_) | Self::InvalidRequest { .. }
        )
    }
}

impl From<DependencyError> for SessionError {
    fn from(err: DependencyError) -> Self {
        match err {
            DependencyError::Registry(e) => Self::Validation(e),
            DependencyError::Formula(e) => Self::FormulaSemantic(e),
            DependencyError::NotAFormula(_) => Self::invalid_request(err.to_string()),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
