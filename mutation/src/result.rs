//! Mutation result types.

use crate::MutationStep;

/// What applying a plan did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationOutcome {
    /// Steps applied, in order.
    pub steps: usize,
    /// Primitive writes logged.
    pub writes: usize,
    /// Steps that found nothing to do.
    pub unchanged: Vec<String>,
}

impl MutationOutcome {
    pub fn record(&mut self, step: &MutationStep, writes: usize) {
        self.steps += 1;
        self.writes += writes;
        if writes == 0 {
            self.unchanged.push(step.to_string());
        }
    }

    /// Check if nothing was written.
    pub fn is_noop(&self) -> bool {
        self.writes == 0
    }
}
