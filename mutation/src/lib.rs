//! Mingle Mutation
//!
//! Carry out an accepted property change.
//!
//! Responsibilities:
//! - Turn a dependency graph into an ordered change plan
//! - Apply each step through journaled writes
//! - Record an undo entry for every primitive write
//!
//! # Module Structure
//!
//! - `plan` - ChangePlan and the planner that builds it
//! - `step` - the MutationStep vocabulary
//! - `executor` - MutationExecutor, which applies plans
//! - `ops/` - individual step implementations
//! - `writer` / `undo` - journaled writes and their undo log

mod error;
mod executor;
mod ops;
mod plan;
mod result;
mod step;
mod undo;
mod writer;

pub use error::{MutationError, MutationResult};
pub use executor::{MutationExecutor, DEFAULT_PRECISION};
pub use plan::{ChangePlan, ChangePlanner, PlanSubject};
pub use result::MutationOutcome;
pub use step::MutationStep;
pub use undo::{UndoEntry, UndoLog};
pub use writer::Writer;
