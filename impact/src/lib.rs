//! Mingle Impact Classifier
//!
//! Sorts the dependents of a proposed change into blocking, warning and
//! silent impacts and decides whether the change may proceed.

mod classifier;
mod impact;

pub use classifier::ImpactClassifier;
pub use impact::{Decision, Impact, ImpactReport, Severity};
