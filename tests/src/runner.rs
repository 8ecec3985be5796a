//! Scenario runner.

use mingle_graph::Project;
use mingle_session::{ChangeResponse, Session};

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::{Action, Scenario};

/// Runs a scenario through a session.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    pub fn run(&self) -> ScenarioResult<Project> {
        let project = self
            .scenario
            .project
            .clone()
            .ok_or_else(|| ScenarioError::MissingProject(self.scenario.name.clone()))?;
        let mut session = Session::with_repository(project, self.scenario.config.clone());

        for step in self.scenario.steps() {
            let response = execute(&mut session, &step.action);
            let project = session.project().lock();
            step.assertion.verify(&step.name, &response, &project)?;
        }

        let project = session.project().lock().clone();
        Ok(project)
    }
}

fn execute(session: &mut Session<Project>, action: &Action) -> ChangeResponse {
    match action {
        Action::Change(request) => session.handle_change(request),
        Action::Hide { property, confirm } => session.hide_property(*property, *confirm),
        Action::Unhide(property) => session.unhide_property(*property),
        Action::Delete { property, confirm } => session.delete_property(*property, *confirm),
        Action::Create(property) => session.create_property(property.clone()).into(),
        Action::DeleteCardType(card_type) => session.delete_card_type(*card_type).into(),
    }
}
