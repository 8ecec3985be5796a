//! Mutation error types.

use mingle_analyzer::FormulaError;
use mingle_core::PropertyDefinitionId;
use mingle_graph::GraphError;
use mingle_registry::RegistryError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors raised while applying a change plan.
///
/// Any of these aborts the plan; the caller rolls back the writes made so far.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("{name} is not a formula property")]
    NotAFormula { name: String },

    #[error("Step {step} refers to missing property definition {property}")]
    MissingProperty {
        step: String,
        property: PropertyDefinitionId,
    },
}

impl MutationError {
    pub fn not_a_formula(name: impl Into<String>) -> Self {
        Self::NotAFormula { name: name.into() }
    }

    pub fn missing_property(step: impl Into<String>, property: PropertyDefinitionId) -> Self {
        Self::MissingProperty {
            step: step.into(),
            property,
        }
    }
}

impl From<mingle_parser::ParseError> for MutationError {
    fn from(e: mingle_parser::ParseError) -> Self {
        Self::Formula(FormulaError::from(e))
    }
}
