//! Assertion types and builders for verifying step results.

use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use mingle_graph::{Project, ProjectRepository};
use mingle_session::ChangeResponse;
use std::collections::BTreeSet;

use crate::error::{ScenarioError, ScenarioResult};
use crate::fixtures::formula_invariant_holds;

/// Expected status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Applied,
    Blocked,
    NeedsConfirmation,
    Invalid,
    Failed,
}

impl Status {
    fn of(response: &ChangeResponse) -> Self {
        match response {
            ChangeResponse::Applied => Status::Applied,
            ChangeResponse::Blocked { .. } => Status::Blocked,
            ChangeResponse::NeedsConfirmation { .. } => Status::NeedsConfirmation,
            ChangeResponse::Invalid { .. } => Status::Invalid,
            ChangeResponse::Failed { .. } => Status::Failed,
        }
    }
}

fn messages(response: &ChangeResponse) -> &[String] {
    match response {
        ChangeResponse::Applied => &[],
        ChangeResponse::Blocked { messages } => messages,
        ChangeResponse::NeedsConfirmation { warnings } => warnings,
        ChangeResponse::Invalid { errors } | ChangeResponse::Failed { errors } => errors,
    }
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    status: Option<Status>,
    message_contains: Vec<String>,
    values: Vec<(CardId, PropertyDefinitionId, Value)>,
    resolvable: Vec<(String, bool)>,
    card_types: Vec<(PropertyDefinitionId, BTreeSet<CardTypeId>)>,
    transitions: Option<usize>,
    views: Option<usize>,
    /// Check the formula card-type invariant after the step.
    invariant: bool,
    #[allow(clippy::type_complexity)]
    custom: Option<Box<dyn Fn(&Project) -> bool>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("status", &self.status)
            .field("message_contains", &self.message_contains)
            .field("values", &self.values)
            .field("resolvable", &self.resolvable)
            .field("card_types", &self.card_types)
            .field("transitions", &self.transitions)
            .field("views", &self.views)
            .field("invariant", &self.invariant)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Status ==========

    pub fn applied(mut self) -> Self {
        self.status = Some(Status::Applied);
        self
    }

    pub fn blocked(mut self) -> Self {
        self.status = Some(Status::Blocked);
        self
    }

    pub fn needs_confirmation(mut self) -> Self {
        self.status = Some(Status::NeedsConfirmation);
        self
    }

    pub fn invalid(mut self) -> Self {
        self.status = Some(Status::Invalid);
        self
    }

    pub fn failed(mut self) -> Self {
        self.status = Some(Status::Failed);
        self
    }

    /// Some message, warning or error contains `text`.
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message_contains.push(text.into());
        self
    }

    // ========== Project State ==========

    pub fn value(mut self, card: CardId, property: PropertyDefinitionId, value: Value) -> Self {
        self.values.push((card, property, value));
        self
    }

    /// The name does (or does not) find a visible property.
    pub fn resolves(mut self, name: impl Into<String>, found: bool) -> Self {
        self.resolvable.push((name.into(), found));
        self
    }

    pub fn card_types(
        mut self,
        property: PropertyDefinitionId,
        card_types: impl IntoIterator<Item = CardTypeId>,
    ) -> Self {
        self.card_types
            .push((property, card_types.into_iter().collect()));
        self
    }

    pub fn transitions(mut self, count: usize) -> Self {
        self.transitions = Some(count);
        self
    }

    pub fn views(mut self, count: usize) -> Self {
        self.views = Some(count);
        self
    }

    pub fn formula_invariant(mut self) -> Self {
        self.invariant = true;
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Project) -> bool + 'static,
    {
        self.custom = Some(Box::new(check));
        self
    }

    // ========== Verification ==========

    /// Verify the assertion against a response and the project after it.
    pub fn verify(
        &self,
        step: &str,
        response: &ChangeResponse,
        project: &Project,
    ) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(step, message));

        if let Some(expected) = self.status {
            if Status::of(response) != expected {
                return fail(format!("expected {:?}, got {:?}", expected, response));
            }
        }
        for text in &self.message_contains {
            if !messages(response).iter().any(|m| m.contains(text.as_str())) {
                return fail(format!(
                    "no message contains '{}' in {:?}",
                    text,
                    messages(response)
                ));
            }
        }

        for (card, property, expected) in &self.values {
            let Some(found) = project.cards().get(*card) else {
                return fail(format!("card {} not found", card));
            };
            if found.value(*property) != expected {
                return fail(format!(
                    "card {} {}: expected {:?}, got {:?}",
                    card,
                    property,
                    expected,
                    found.value(*property)
                ));
            }
        }
        for (name, expected) in &self.resolvable {
            let found = project.schema().find_property(name).is_some();
            if found != *expected {
                return fail(format!("property '{}' resolvable: {}", name, found));
            }
        }
        for (property, expected) in &self.card_types {
            let actual = project.schema().card_types_of(*property);
            if &actual != expected {
                return fail(format!(
                    "{} card types: expected {:?}, got {:?}",
                    property, expected, actual
                ));
            }
        }
        if let Some(expected) = self.transitions {
            let actual = project.schema().transitions().count();
            if actual != expected {
                return fail(format!("expected {} transitions, got {}", expected, actual));
            }
        }
        if let Some(expected) = self.views {
            let actual = project.schema().views().count();
            if actual != expected {
                return fail(format!("expected {} views, got {}", expected, actual));
            }
        }
        if self.invariant && !formula_invariant_holds(project.schema()) {
            return fail("formula enabled on a card type without its components".into());
        }
        if let Some(check) = &self.custom {
            if !check(project) {
                return fail("custom check failed".into());
            }
        }
        Ok(())
    }
}
