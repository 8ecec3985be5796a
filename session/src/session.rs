//! The property definition service.

use mingle_analyzer::FormulaAnalyzer;
use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_dependency::{ChangeProposal, DependencyBuilder, PropertyChange};
use mingle_graph::ProjectRepository;
use mingle_impact::{Decision, ImpactClassifier, ImpactReport, Severity};
use mingle_mutation::{ChangePlan, ChangePlanner, MutationOutcome, MutationStep};
use mingle_registry::{
    CardType, FormulaDef, PropertyDefinition, PropertyKind, RegistryError, Schema,
};
use mingle_transaction::TransactionManager;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{SessionError, SessionResult};
use crate::result::{ChangeRequest, ChangeResponse, NewProperty};
use crate::state::{ChangeState, ChangeTracker};

/// A project shared between sessions. Holding the lock makes a session the
/// only writer.
pub type SharedProject<R> = Arc<Mutex<R>>;

/// Entry point for editing property definitions and card types.
pub struct Session<R: ProjectRepository> {
    project: SharedProject<R>,
    config: EngineConfig,
    /// States of the most recent change request.
    last_change: ChangeTracker,
}

impl<R: ProjectRepository> Session<R> {
    /// Create a session over a shared project.
    pub fn new(project: SharedProject<R>, config: EngineConfig) -> Self {
        Self {
            project,
            config,
            last_change: ChangeTracker::new(),
        }
    }

    /// Create a session that owns its project.
    pub fn with_repository(repo: R, config: EngineConfig) -> Self {
        Self::new(Arc::new(Mutex::new(repo)), config)
    }

    pub fn project(&self) -> &SharedProject<R> {
        &self.project
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifecycle of the most recent change request.
    pub fn last_change(&self) -> &ChangeTracker {
        &self.last_change
    }

    // ==================== Property Changes ====================

    /// Handle an edit request and report its outcome.
    #[tracing::instrument(skip(self, request), fields(property = %request.property_definition_id))]
    pub fn handle_change(&mut self, request: &ChangeRequest) -> ChangeResponse {
        self.submit(request.to_proposal(), request.confirm).into()
    }

    /// Classify a proposal without writing anything.
    pub fn preview(&self, proposal: &ChangeProposal) -> SessionResult<ImpactReport> {
        let repo = self.project.lock();
        let proposal = normalize_proposal(&self.config, &*repo, proposal)?;
        let graph = DependencyBuilder::new(repo.schema(), repo.cards()).build(&proposal)?;
        Ok(ImpactClassifier::new(repo.schema())
            .with_silent_confirmation(self.config.require_confirmation_for_silent)
            .classify(&graph))
    }

    /// Hide a property. Views that mention it are destroyed.
    pub fn hide_property(&mut self, id: PropertyDefinitionId, confirm: bool) -> ChangeResponse {
        self.submit(ChangeProposal::hide(id), confirm).into()
    }

    pub fn unhide_property(&mut self, id: PropertyDefinitionId) -> ChangeResponse {
        self.submit(ChangeProposal::unhide(id), false).into()
    }

    /// Delete a property with its values and everything that depends on it.
    pub fn delete_property(&mut self, id: PropertyDefinitionId, confirm: bool) -> ChangeResponse {
        self.submit(ChangeProposal::delete(id), confirm).into()
    }

    /// Validate, classify and apply one proposal under the project lock.
    pub fn submit(
        &mut self,
        proposal: ChangeProposal,
        confirm: bool,
    ) -> SessionResult<MutationOutcome> {
        let project = Arc::clone(&self.project);
        let mut repo = project.lock();
        let mut tracker = ChangeTracker::new();

        let result = process(&self.config, &mut *repo, &proposal, confirm, &mut tracker);
        match &result {
            Ok(outcome) => info!(
                property = %proposal.property,
                action = proposal.action(),
                writes = outcome.writes,
                "property change applied"
            ),
            Err(e) => {
                tracker.fail_with(e);
                warn!(
                    property = %proposal.property,
                    action = proposal.action(),
                    state = ?tracker.current(),
                    error = %e,
                    "property change not applied"
                );
            }
        }
        self.last_change = tracker;
        result
    }

    // ==================== Creation ====================

    /// Create a property on the given card types.
    ///
    /// Aggregates and tree relationships belong to their tree and are not
    /// created here.
    pub fn create_property(&mut self, new: NewProperty) -> SessionResult<PropertyDefinitionId> {
        let project = Arc::clone(&self.project);
        let mut repo = project.lock();

        let name = repo
            .schema()
            .validate_property_name(&new.name, &self.config.name_rules(), None)?;
        if new.card_type_ids.is_empty() {
            return Err(SessionError::invalid_request(format!(
                "{name} must be enabled on at least one card type"
            )));
        }
        for &ct in &new.card_type_ids {
            repo.schema().require_card_type(ct)?;
        }
        let described = new.kind.describe();
        let kind = match new.kind {
            PropertyKind::Aggregate(_) | PropertyKind::TreeRelationship { .. } => {
                return Err(SessionError::invalid_request(format!(
                    "{described} properties are created from a tree configuration"
                )));
            }
            PropertyKind::Formula(def) => {
                let compiled = FormulaAnalyzer::new(repo.schema()).analyze(
                    &def.expression,
                    None,
                    &new.card_type_ids,
                )?;
                PropertyKind::Formula(FormulaDef {
                    expression: compiled.text,
                    ..def
                })
            }
            kind => kind,
        };
        let is_formula = kind.is_formula();

        let id = repo.schema_mut().allocate_property_id();
        let mut plan = ChangePlan::new(id);
        plan.push(MutationStep::CreateProperty {
            definition: PropertyDefinition::new(id, name, kind).with_description(new.description),
        });
        plan.push(MutationStep::UpdateAttributes {
            property: id,
            name: None,
            description: None,
            card_types: Some(new.card_type_ids),
            formula: None,
        });
        if is_formula {
            plan.push(MutationStep::RecomputeFormula { formula: id });
        }

        TransactionManager::new(&mut *repo)
            .with_precision(self.config.precision)
            .run(|txn| txn.apply(&plan).map_err(SessionError::from))?;
        info!(property = %id, "property created");
        Ok(id)
    }

    /// Look up a visible property by name.
    pub fn find_property(&self, name: &str) -> Option<PropertyDefinition> {
        self.project.lock().schema().find_property(name).cloned()
    }

    // ==================== Card Types ====================

    /// Create a card type at the end of the card type list.
    pub fn create_card_type(&mut self, name: &str) -> SessionResult<CardTypeId> {
        let mut repo = self.project.lock();
        let name = self.config.name_rules().validate_card_type(name)?;
        if repo.schema().find_card_type(&name).is_some() {
            return Err(RegistryError::NameTaken(name).into());
        }
        let position = repo
            .schema()
            .card_types()
            .last()
            .map(|t| t.position + 1)
            .unwrap_or(0);
        let schema = repo.schema_mut();
        let id = schema.allocate_card_type_id();
        schema.put_card_type(CardType::new(id, name, position));
        info!(card_type = %id, "card type created");
        Ok(id)
    }

    /// Delete a card type that has no cards.
    ///
    /// Its transitions and card defaults go with it. Saved views stop
    /// filtering on it; views filtered to it alone are destroyed.
    pub fn delete_card_type(&mut self, id: CardTypeId) -> SessionResult<()> {
        let mut repo = self.project.lock();
        let (name, plan) = {
            let schema = repo.schema();
            let card_type = schema.require_card_type(id)?;
            let cards = repo.cards().count_of_type(id);
            if cards > 0 {
                return Err(RegistryError::card_type_in_use(card_type.name.clone(), cards).into());
            }
            if let Some(tree) = schema.trees().find(|t| t.contains(id)) {
                return Err(SessionError::invalid_request(format!(
                    "{} is used by tree {}",
                    card_type.name, tree.name
                )));
            }
            if schema.card_type_count() == 1 {
                return Err(RegistryError::LastCardType.into());
            }
            (card_type.name.clone(), card_type_removal(schema, id))
        };

        TransactionManager::new(&mut *repo)
            .with_precision(self.config.precision)
            .run(|txn| txn.apply(&plan).map_err(SessionError::from))?;
        info!(card_type = %name, steps = plan.len(), "card type deleted");
        Ok(())
    }
}

/// Steps removing a card type and whatever only makes sense with it.
fn card_type_removal(schema: &Schema, id: CardTypeId) -> ChangePlan {
    let mut plan = ChangePlan::for_card_type(id);
    for transition in schema.transitions().filter(|t| t.card_type == id) {
        plan.push(MutationStep::DeleteTransition { id: transition.id });
    }
    for view in schema.views().filter(|v| v.card_types.contains(&id)) {
        if view.card_types.len() == 1 {
            plan.push(MutationStep::DestroyView { id: view.id });
        } else {
            plan.push(MutationStep::NarrowView {
                view: view.id,
                card_type: id,
            });
        }
    }
    plan.push(MutationStep::DeleteCardType { card_type: id });
    plan
}

/// Run one proposal through validation, classification and application.
fn process<R: ProjectRepository>(
    config: &EngineConfig,
    repo: &mut R,
    proposal: &ChangeProposal,
    confirm: bool,
    tracker: &mut ChangeTracker,
) -> SessionResult<MutationOutcome> {
    tracker.advance(ChangeState::Validating)?;
    let proposal = normalize_proposal(config, &*repo, proposal)?;

    TransactionManager::new(repo)
        .with_precision(config.precision)
        .run(|txn| {
            let plan = {
                let schema = txn.repo().schema();
                let graph = DependencyBuilder::new(schema, txn.repo().cards()).build(&proposal)?;
                let report = ImpactClassifier::new(schema)
                    .with_silent_confirmation(config.require_confirmation_for_silent)
                    .classify(&graph);
                match report.decision(confirm) {
                    Decision::Blocked => {
                        return Err(SessionError::blocking(report.messages(Severity::Blocking)))
                    }
                    Decision::NeedsConfirmation => {
                        return Err(SessionError::confirmation_required(
                            report.confirmation_messages(),
                        ))
                    }
                    Decision::Proceed => ChangePlanner::new(schema).plan(&graph),
                }
            };
            tracker.advance(ChangeState::Applying)?;
            let outcome = txn.apply(&plan)?;
            tracker.advance(ChangeState::Applied)?;
            Ok(outcome)
        })
}

/// Check the new name, if any, and replace it with its normalized form.
fn normalize_proposal<R: ProjectRepository>(
    config: &EngineConfig,
    repo: &R,
    proposal: &ChangeProposal,
) -> SessionResult<ChangeProposal> {
    let mut proposal = proposal.clone();
    if let PropertyChange::Update(update) = &mut proposal.change {
        if let Some(raw) = &update.name {
            let name = repo.schema().validate_property_name(
                raw,
                &config.name_rules(),
                Some(proposal.property),
            )?;
            update.name = Some(name);
        }
    }
    Ok(proposal)
}
