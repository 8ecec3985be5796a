//! Dependency builder error types.

use mingle_analyzer::FormulaError;
use mingle_registry::RegistryError;
use thiserror::Error;

/// Errors raised while resolving a proposal against the schema.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DependencyError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The formula the change would leave behind does not validate.
    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("Property {0} is not a formula property")]
    NotAFormula(String),
}

/// Result type for dependency operations.
pub type DependencyResult<T> = Result<T, DependencyError>;
