//! Transaction manager for all-or-nothing property changes.

use mingle_graph::ProjectRepository;
use mingle_mutation::{ChangePlan, MutationExecutor, MutationOutcome, UndoLog, DEFAULT_PRECISION};
use tracing::{debug, info, warn};

use crate::error::{TransactionError, TransactionResult};

/// Transaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// No transaction is active.
    Inactive,
    /// Transaction is active.
    Active,
    /// Transaction is being committed.
    Committing,
    /// Transaction is being rolled back.
    RollingBack,
}

/// Transaction manager over one project repository.
///
/// Writes are applied to the repository directly and logged; rollback
/// replays the log in reverse. One writer at a time.
pub struct TransactionManager<'p, R: ProjectRepository> {
    repo: &'p mut R,
    state: TransactionState,
    log: UndoLog,
    precision: u8,
}

impl<'p, R: ProjectRepository> TransactionManager<'p, R> {
    /// Create a new transaction manager.
    pub fn new(repo: &'p mut R) -> Self {
        Self {
            repo,
            state: TransactionState::Inactive,
            log: UndoLog::new(),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Decimal places used when recomputing formulas.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Read access to the project, including uncommitted writes.
    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Check if a transaction is active.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Get the current transaction state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Writes made in the current transaction.
    pub fn pending_writes(&self) -> usize {
        self.log.len()
    }

    // ========== Transaction Lifecycle ==========

    /// Begin a new transaction.
    pub fn begin(&mut self) -> TransactionResult<()> {
        if self.state == TransactionState::Active {
            return Err(TransactionError::AlreadyActive);
        }
        self.log.clear();
        self.state = TransactionState::Active;
        debug!("transaction begun");
        Ok(())
    }

    /// Commit the current transaction. Returns the number of writes kept.
    pub fn commit(&mut self) -> TransactionResult<usize> {
        self.ensure_active()?;
        self.state = TransactionState::Committing;
        let writes = self.log.len();
        self.log.clear();
        self.state = TransactionState::Inactive;
        debug!(writes, "transaction committed");
        Ok(writes)
    }

    /// Rollback the current transaction. Returns the number of writes undone.
    pub fn rollback(&mut self) -> TransactionResult<usize> {
        self.ensure_active()?;
        Ok(self.do_rollback())
    }

    fn do_rollback(&mut self) -> usize {
        self.state = TransactionState::RollingBack;
        let reverted = self.log.rollback(&mut *self.repo);
        self.state = TransactionState::Inactive;
        info!(reverted, "transaction rolled back");
        reverted
    }

    fn ensure_active(&self) -> TransactionResult<()> {
        if self.state != TransactionState::Active {
            return Err(TransactionError::NoActiveTransaction);
        }
        Ok(())
    }

    // ========== Operations ==========

    /// Apply a plan inside the active transaction.
    ///
    /// When a step fails, every write of the transaction is reverted and the
    /// step's error is returned; the transaction is then over.
    pub fn apply(&mut self, plan: &ChangePlan) -> TransactionResult<MutationOutcome> {
        self.ensure_active()?;
        let result = MutationExecutor::new(&mut *self.repo, &mut self.log)
            .with_precision(self.precision)
            .apply(plan);
        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, subject = %plan.subject, "change plan failed");
                self.do_rollback();
                Err(e.into())
            }
        }
    }

    /// Run `f` in a transaction: commit when it succeeds, roll back when it
    /// fails. Errors from `f` are returned unchanged.
    pub fn run<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<TransactionError>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(e) => {
                if self.is_active() {
                    self.do_rollback();
                }
                Err(e)
            }
        }
    }
}
