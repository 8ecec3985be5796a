//! Mingle Registry
//!
//! The project schema: property definitions, card types, trees, aggregates,
//! transitions, saved views and card defaults, plus the name rules every
//! property and card type must satisfy.
//!
//! Unlike cards, the schema is edited in place; every write returns what it
//! replaced so a transaction can undo it.

mod builder;
mod error;
pub mod naming;
mod schema;
mod types;

pub use builder::{
    CardTypeBuilder, PropertyBuilder, SchemaBuilder, TransitionBuilder, TreeBuilder, ViewBuilder,
};
pub use error::{RegistryError, RegistryResult};
pub use naming::NameRules;
pub use schema::{Schema, Sequences};
pub use types::*;
