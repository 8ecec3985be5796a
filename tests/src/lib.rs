//! Mingle integration test support.
//!
//! Scenarios run a sequence of steps against a project through a session
//! and check each response and the project state after it.
//!
//! ```ignore
//! let p = Planning::new();
//! Scenario::new("rename")
//!     .project(p.project.clone())
//!     .step("rename", Action::change(ChangeRequest::new(p.size).rename("points")), |a| a.applied())
//!     .run()
//!     .unwrap();
//! ```

mod assertion;
mod error;
pub mod fixtures;
mod runner;
mod scenario;

pub use assertion::Assertion;
pub use error::{ScenarioError, ScenarioResult};
pub use runner::Runner;
pub use scenario::{Action, Scenario, Step};

/// Everything a scenario file needs.
pub mod prelude {
    pub use crate::fixtures::{date, formula_invariant_holds, Planning};
    pub use crate::{Action, Assertion, Scenario, ScenarioError, ScenarioResult};
    pub use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
    pub use mingle_graph::{Project, ProjectRepository};
    pub use mingle_registry::{FormulaDef, PropertyKind};
    pub use mingle_session::{ChangeRequest, ChangeResponse, NewProperty};
}
