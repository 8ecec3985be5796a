//! Registry error types.

use mingle_core::{messages, CardTypeId, PropertyDefinitionId, TreeId};
use thiserror::Error;

/// Errors raised while building or editing the project schema.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("{}", messages::ERR_NAME_BLANK)]
    NameBlank,

    #[error("{}", messages::ERR_NAME_INVALID_CHARS)]
    NameInvalidChars(String),

    #[error("{}", messages::name_taken(.0))]
    NameTaken(String),

    #[error("{}", messages::name_too_long(.max))]
    NameTooLong { name: String, max: usize },

    #[error("{}", messages::name_reserved(.0))]
    NameReserved(String),

    #[error("Property definition not found: {0}")]
    UnknownProperty(PropertyDefinitionId),

    #[error("Card type not found: {0}")]
    UnknownCardType(CardTypeId),

    #[error("Tree not found: {0}")]
    UnknownTree(TreeId),

    #[error("{}", messages::ERR_LAST_CARD_TYPE)]
    LastCardType,

    #[error("Card type {name} cannot be deleted while {cards} cards use it")]
    CardTypeInUse { name: String, cards: usize },
}

impl RegistryError {
    pub fn name_too_long(name: impl Into<String>, max: usize) -> Self {
        Self::NameTooLong {
            name: name.into(),
            max,
        }
    }

    pub fn card_type_in_use(name: impl Into<String>, cards: usize) -> Self {
        Self::CardTypeInUse {
            name: name.into(),
            cards,
        }
    }

    /// Whether this error is a user-correctable name problem.
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            Self::NameBlank
                | Self::NameInvalidChars(_)
                | Self::NameTaken(_)
                | Self::NameTooLong { .. }
                | Self::NameReserved(_)
        )
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
