//! Card storage error types.

use mingle_core::{CardId, CardTypeId, PropertyDefinitionId};
use thiserror::Error;

/// Errors from card storage operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// Card not found.
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    /// Card type not found.
    #[error("Card type not found: {0}")]
    CardTypeNotFound(CardTypeId),

    /// Value for a property the card's type does not have.
    #[error("Property {property} is not available on card type {card_type}")]
    PropertyNotEnabled {
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    },
}

/// Result type for card storage operations.
pub type GraphResult<T> = Result<T, GraphError>;
