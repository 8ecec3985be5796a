//! Scenario definitions.

use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_graph::Project;
use mingle_session::{ChangeRequest, EngineConfig, NewProperty};

use crate::assertion::Assertion;
use crate::error::ScenarioResult;
use crate::runner::Runner;

/// What a step asks the session to do.
#[derive(Debug, Clone)]
pub enum Action {
    Change(ChangeRequest),
    Hide {
        property: PropertyDefinitionId,
        confirm: bool,
    },
    Unhide(PropertyDefinitionId),
    Delete {
        property: PropertyDefinitionId,
        confirm: bool,
    },
    Create(NewProperty),
    DeleteCardType(CardTypeId),
}

impl Action {
    pub fn change(request: ChangeRequest) -> Self {
        Action::Change(request)
    }

    pub fn hide(property: PropertyDefinitionId) -> Self {
        Action::Hide {
            property,
            confirm: true,
        }
    }

    pub fn unhide(property: PropertyDefinitionId) -> Self {
        Action::Unhide(property)
    }

    pub fn delete(property: PropertyDefinitionId) -> Self {
        Action::Delete {
            property,
            confirm: true,
        }
    }

    pub fn create(property: NewProperty) -> Self {
        Action::Create(property)
    }

    pub fn delete_card_type(card_type: CardTypeId) -> Self {
        Action::DeleteCardType(card_type)
    }
}

/// A named step with its expected outcome.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub action: Action,
    pub assertion: Assertion,
}

/// A sequence of steps run against one project.
#[derive(Debug, Default)]
pub struct Scenario {
    pub name: String,
    pub project: Option<Project>,
    pub config: EngineConfig,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the starting project.
    pub fn project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a step; `expect` builds its assertion.
    pub fn step<F>(mut self, name: impl Into<String>, action: Action, expect: F) -> Self
    where
        F: FnOnce(Assertion) -> Assertion,
    {
        self.steps.push(Step {
            name: name.into(),
            action,
            assertion: expect(Assertion::new()),
        });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failed assertion.
    /// Returns the project as the last step left it.
    pub fn run(&self) -> ScenarioResult<Project> {
        Runner::new(self).run()
    }
}
