//! Mingle Session
//!
//! The service callers talk to. A session validates a change request for a
//! property definition, finds and classifies what depends on it, and
//! applies it in one transaction once nothing blocks it and the user has
//! confirmed the warnings.
//!
//! Card type creation and deletion live here too, since they share the
//! name rules and the project lock.

mod config;
mod error;
mod result;
mod session;
mod state;

pub use config::EngineConfig;
pub use error::{SessionError, SessionResult};
pub use result::{ChangeRequest, ChangeResponse, NewProperty};
pub use session::{Session, SharedProject};
pub use state::{ChangeState, ChangeTracker};
