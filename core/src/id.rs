//! Identity types for project entities.
//!
//! All identifiers are 64-bit values that are:
//! - Unique within their namespace (one project)
//! - Immutable once assigned
//! - Opaque to external users

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new id from a raw value.
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier for a property definition.
    PropertyDefinitionId,
    "pd"
);

define_id!(
    /// Identifier for a card type.
    CardTypeId,
    "ct"
);

define_id!(
    /// Identifier for a card.
    CardId,
    "c"
);

define_id!(
    /// Identifier for a transition.
    TransitionId,
    "tr"
);

define_id!(
    /// Identifier for a saved card list view or team favorite.
    ViewId,
    "v"
);

define_id!(
    /// Identifier for a tree configuration.
    TreeId,
    "tree"
);
