//! Mingle Dependency Graph
//!
//! Given a proposed change to a property definition, finds every artifact
//! that depends on it: formulas, aggregates, trees, transitions, saved views,
//! card defaults and card values. The traversal never writes; the same
//! result backs both the confirmation preview and the apply step.

mod builder;
mod dependency;
mod error;
mod proposal;

pub use builder::{DependencyBuilder, DependencyGraph};
pub use dependency::{Dependency, DependencyKind, DependentEntity};
pub use error::{DependencyError, DependencyResult};
pub use proposal::{ChangeProposal, PropertyChange, PropertyUpdate};
