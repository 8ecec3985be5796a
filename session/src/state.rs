//! Lifecycle of one change request.

use crate::error::{SessionError, SessionResult};
use serde::Serialize;
use tracing::debug;

/// Where a change request is in its lifecycle.
///
/// `Proposed -> Validating -> { Blocked | Rejected | NeedsConfirmation |
/// Applying -> { Applied | Failed } }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeState {
    Proposed,
    Validating,
    Blocked,
    Rejected,
    NeedsConfirmation,
    Applying,
    Applied,
    Failed,
}

impl ChangeState {
    /// Check if `next` may follow this state.
    pub fn can_become(self, next: ChangeState) -> bool {
        use ChangeState::*;
        matches!(
            (self, next),
            (Proposed, Validating)
                | (Validating, Blocked)
                | (Validating, Rejected)
                | (Validating, NeedsConfirmation)
                | (Validating, Applying)
                | (Applying, Applied)
                | (Applying, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ChangeState::Blocked
                | ChangeState::Rejected
                | ChangeState::NeedsConfirmation
                | ChangeState::Applied
                | ChangeState::Failed
        )
    }
}

/// The states one request went through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeTracker {
    history: Vec<ChangeState>,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self {
            history: vec![ChangeState::Proposed],
        }
    }

    pub fn current(&self) -> ChangeState {
        self.history
            .last()
            .copied()
            .unwrap_or(ChangeState::Proposed)
    }

    pub fn history(&self) -> &[ChangeState] {
        &self.history
    }

    /// Move to `next`, refusing transitions the lifecycle does not allow.
    pub fn advance(&mut self, next: ChangeState) -> SessionResult<()> {
        let from = self.current();
        if !from.can_become(next) {
            return Err(SessionError::InvalidTransition { from, to: next });
        }
        debug!(?from, to = ?next, "change state");
        self.history.push(next);
        Ok(())
    }

    /// Settle on the terminal state matching an error.
    pub fn fail_with(&mut self, err: &SessionError) {
        let next = match (self.current(), err) {
            (ChangeState::Applying, _) => ChangeState::Failed,
            (_, SessionError::BlockingDependency { .. }) => ChangeState::Blocked,
            (_, SessionError::ConfirmationRequired { .. }) => ChangeState::NeedsConfirmation,
            (_, SessionError::Transaction(_)) => ChangeState::Failed,
            _ => ChangeState::Rejected,
        };
        if self.current() == ChangeState::Proposed {
            self.history.push(ChangeState::Validating);
        }
        if self.current().can_become(next) {
            self.history.push(next);
        }
    }
}
