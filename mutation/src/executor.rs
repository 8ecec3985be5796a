//! Mutation executor - applies change plans step by step.
//!
//! The executor delegates to the operation modules in `ops/`:
//! - `ops/property.rs` - attribute updates, renames, hide/unhide, delete
//! - `ops/artifacts.rs` - transitions, views, card defaults, card types
//! - `ops/cards.rs` - card values and formula recomputation

use crate::error::MutationResult;
use crate::ops::{self, AttributeUpdate};
use crate::result::MutationOutcome;
use crate::{ChangePlan, MutationStep, UndoLog, Writer};
use mingle_graph::ProjectRepository;
use tracing::debug;

/// Decimal places of computed formula values, unless configured.
pub const DEFAULT_PRECISION: u8 = 2;

/// Mutation executor.
///
/// Every write goes to the undo log; the executor never rolls back by
/// itself, its owner decides.
pub struct MutationExecutor<'a, R: ProjectRepository> {
    writer: Writer<'a, R>,
    precision: u8,
}

impl<'a, R: ProjectRepository> MutationExecutor<'a, R> {
    /// Create a new executor.
    pub fn new(repo: &'a mut R, log: &'a mut UndoLog) -> Self {
        Self {
            writer: Writer::new(repo, log),
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Apply every step of a plan, stopping at the first failure.
    pub fn apply(&mut self, plan: &ChangePlan) -> MutationResult<MutationOutcome> {
        let mut outcome = MutationOutcome::default();
        for step in plan.steps() {
            let writes = self.apply_step(step)?;
            outcome.record(step, writes);
        }
        Ok(outcome)
    }

    /// Apply one step; returns the number of writes it made.
    pub fn apply_step(&mut self, step: &MutationStep) -> MutationResult<usize> {
        let before = self.writer.writes();
        let w = &mut self.writer;
        match step {
            MutationStep::CreateProperty { definition } => ops::create_property(w, definition)?,
            MutationStep::RerenderFormula { formula, from, to } => {
                ops::rerender_formula(w, *formula, from, to)?
            }
            MutationStep::DeleteTransition { id } => ops::delete_transition(w, *id)?,
            MutationStep::DestroyView { id } => ops::destroy_view(w, *id)?,
            MutationStep::DropViewColumn { view, property } => {
                ops::drop_view_column(w, *view, *property)?
            }
            MutationStep::NarrowView { view, card_type } => {
                ops::narrow_view(w, *view, *card_type)?
            }
            MutationStep::ClearCardDefault {
                card_type,
                property,
            } => ops::clear_card_default(w, *card_type, *property)?,
            MutationStep::DetachFormula { formula, card_type } => {
                ops::detach_formula(w, *formula, *card_type)?
            }
            MutationStep::NullCardValues {
                property,
                card_type,
            } => ops::null_card_values(w, *property, *card_type)?,
            MutationStep::UpdateAttributes {
                property,
                name,
                description,
                card_types,
                formula,
            } => ops::update_attributes(
                w,
                *property,
                AttributeUpdate {
                    name: name.as_deref(),
                    description: description.as_deref(),
                    card_types: card_types.as_ref(),
                    formula: formula.as_deref(),
                },
            )?,
            MutationStep::RecomputeFormula { formula } => {
                ops::recompute_formula(w, *formula, self.precision)?;
            }
            MutationStep::HideProperty { property } => ops::hide_property(w, *property)?,
            MutationStep::UnhideProperty { property } => ops::unhide_property(w, *property)?,
            MutationStep::DeleteProperty { property } => ops::delete_property(w, *property)?,
            MutationStep::DeleteCardType { card_type } => ops::delete_card_type(w, *card_type)?,
        }
        let writes = self.writer.writes() - before;
        debug!(step = %step, writes, "step applied");
        Ok(writes)
    }
}
