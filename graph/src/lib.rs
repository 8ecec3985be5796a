//! Mingle Card Storage
//!
//! This crate provides card storage with indexed access and the repository
//! seam the engine mutates a project through:
//! - Card storage, with a card-type index
//! - The `ProjectRepository` trait
//! - `Project`, the in-memory repository (schema plus cards)

mod card;
mod error;
mod index;
mod project;
mod store;

pub use card::Card;
pub use error::{GraphError, GraphResult};
pub use project::{Project, ProjectRepository};
pub use store::CardStore;
