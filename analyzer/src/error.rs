//! Formula error types.

use mingle_parser::ParseError;
use thiserror::Error;

/// Errors raised while validating a formula expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    /// The text does not parse.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A name that resolves to no property definition.
    #[error("Property {name} does not exist.")]
    UnknownProperty { name: String },

    /// A component that is itself a formula, or the formula itself.
    #[error("Property {name} is a formula property and cannot be used within another formula.")]
    NestedFormula { name: String },

    /// A component of a kind formulas cannot compute with.
    #[error("Property {name} is a {kind} property and cannot be used in a formula.")]
    UnsupportedComponent { name: String, kind: String },

    /// Date arithmetic misuse.
    #[error("The expression {expression} is invalid because {reason}.")]
    InvalidExpression { expression: String, reason: String },

    /// A component missing on some card type of the formula.
    #[error(
        "The component property should be available to all card types that formula property is available to. {component} is not available to {}.",
        .card_types.join(", ")
    )]
    IncompatibleCardTypes {
        component: String,
        card_types: Vec<String>,
    },
}

impl FormulaError {
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty { name: name.into() }
    }

    pub fn nested_formula(name: impl Into<String>) -> Self {
        Self::NestedFormula { name: name.into() }
    }

    pub fn unsupported_component(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedComponent {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// `number - date`: only addition works in that direction.
    pub fn date_subtracted_from_number(
        expression: impl Into<String>,
        date: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: format!(
                "a date ({}) cannot be subtracted from a number ({}). The supported operation is addition, rather than subtraction",
                date.into(),
                number.into()
            ),
        }
    }

    /// `date + date`: only subtraction works between two dates.
    pub fn dates_added(expression: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: "two dates cannot be added. The supported operation is subtraction, rather than addition".to_string(),
        }
    }

    /// `*` or `/` with a date operand.
    pub fn date_scaled(expression: impl Into<String>, op: &str) -> Self {
        let verb = if op == "*" { "multiplied" } else { "divided" };
        Self::InvalidExpression {
            expression: expression.into(),
            reason: format!("dates cannot be {}", verb),
        }
    }

    /// `-date`.
    pub fn date_negated(expression: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: "a date cannot be negated".to_string(),
        }
    }

    pub fn incompatible_card_types(component: impl Into<String>, card_types: Vec<String>) -> Self {
        Self::IncompatibleCardTypes {
            component: component.into(),
            card_types,
        }
    }

    /// Check if this error concerns date arithmetic.
    pub fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::InvalidExpression { .. })
    }
}

/// Result type for formula operations.
pub type FormulaResult<T> = Result<T, FormulaError>;
