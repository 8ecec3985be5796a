//! Mingle Core Types
//!
//! This crate provides the foundational types used throughout the engine:
//! - Identity types (PropertyDefinitionId, CardTypeId, CardId, ...)
//! - Property values (the Value enum, including dates)
//! - User-facing message texts shared by the classifier and the session
//! - Common error types

mod error;
mod id;
pub mod messages;
mod value;

pub use error::*;
pub use id::*;
pub use value::*;
