//! Change plans: the ordered steps that carry out an accepted proposal.

use crate::MutationStep;
use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_dependency::{
    Dependency, DependencyGraph, DependencyKind, DependentEntity, PropertyChange,
};
use mingle_registry::{naming, Schema};
use serde::Serialize;
use std::fmt;

/// What a plan changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "subject", content = "id", rename_all = "snake_case")]
pub enum PlanSubject {
    Property(PropertyDefinitionId),
    CardType(CardTypeId),
}

impl fmt::Display for PlanSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanSubject::Property(id) => write!(f, "{}", id),
            PlanSubject::CardType(id) => write!(f, "{}", id),
        }
    }
}

/// Ordered steps for one property or card type change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePlan {
    pub subject: PlanSubject,
    steps: Vec<MutationStep>,
}

impl ChangePlan {
    pub fn new(property: PropertyDefinitionId) -> Self {
        Self::about(PlanSubject::Property(property))
    }

    pub fn for_card_type(card_type: CardTypeId) -> Self {
        Self::about(PlanSubject::CardType(card_type))
    }

    fn about(subject: PlanSubject) -> Self {
        Self {
            subject,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: MutationStep) {
        if !self.steps.contains(&step) {
            self.steps.push(step);
        }
    }

    pub fn steps(&self) -> &[MutationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Turns a dependency graph into a change plan.
///
/// Step order: formula re-renders (they resolve the old name), transitions,
/// views, card defaults, formula detachments, card values, then the property
/// itself and finally any formula recomputation.
pub struct ChangePlanner<'s> {
    schema: &'s Schema,
}

impl<'s> ChangePlanner<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn plan(&self, graph: &DependencyGraph) -> ChangePlan {
        let property = graph.property();
        let mut plan = ChangePlan::new(property);

        match &graph.proposal.change {
            PropertyChange::Update(update) => {
                if let Some(new_name) = &update.name {
                    self.rerenders(graph, &naming::normalize(new_name), &mut plan);
                }
                self.cleanup(graph, &mut plan);
                plan.push(MutationStep::UpdateAttributes {
                    property,
                    name: update.name.as_deref().map(naming::normalize),
                    description: update.description.clone(),
                    card_types: update.card_types.clone(),
                    formula: update
                        .formula
                        .as_ref()
                        .and(graph.formula.as_ref())
                        .map(|compiled| compiled.text.clone()),
                });
                if graph.formula.is_some() {
                    plan.push(MutationStep::RecomputeFormula { formula: property });
                }
            }
            PropertyChange::Hide => {
                self.cleanup(graph, &mut plan);
                plan.push(MutationStep::HideProperty { property });
            }
            PropertyChange::Unhide => plan.push(MutationStep::UnhideProperty { property }),
            PropertyChange::Delete => {
                self.cleanup(graph, &mut plan);
                plan.push(MutationStep::DeleteProperty { property });
            }
        }
        plan
    }

    fn rerenders(&self, graph: &DependencyGraph, new_name: &str, plan: &mut ChangePlan) {
        let Some(old_name) = self.schema.property(graph.property()).map(|p| p.name.clone()) else {
            return;
        };
        for dep in graph.iter() {
            if let (DependentEntity::Formula(formula), DependencyKind::RenamedReference) =
                (&dep.entity, &dep.kind)
            {
                plan.push(MutationStep::RerenderFormula {
                    formula: *formula,
                    from: old_name.clone(),
                    to: new_name.to_string(),
                });
            }
        }
    }

    /// Steps for dependents that lose the property, grouped by kind.
    fn cleanup(&self, graph: &DependencyGraph, plan: &mut ChangePlan) {
        let mut steps: Vec<MutationStep> = graph
            .iter()
            .flat_map(|dep| cleanup_steps(graph.property(), dep))
            .collect();
        steps.sort_by_key(rank);
        for step in steps {
            plan.push(step);
        }
    }
}

fn cleanup_steps(property: PropertyDefinitionId, dep: &Dependency) -> Vec<MutationStep> {
    match (&dep.entity, &dep.kind) {
        (DependentEntity::Transition(id), _) => vec![MutationStep::DeleteTransition { id: *id }],
        (DependentEntity::View(view), DependencyKind::ListsColumn) => {
            vec![MutationStep::DropViewColumn {
                view: *view,
                property,
            }]
        }
        (DependentEntity::View(view), DependencyKind::ListsFormulaColumn { formula }) => {
            vec![MutationStep::DropViewColumn {
                view: *view,
                property: *formula,
            }]
        }
        (DependentEntity::View(id), _) => vec![MutationStep::DestroyView { id: *id }],
        (DependentEntity::CardDefaults(card_type), _) => vec![MutationStep::ClearCardDefault {
            card_type: *card_type,
            property,
        }],
        (DependentEntity::Formula(formula), DependencyKind::ComponentOf { detached_from }) => {
            detached_from
                .iter()
                .map(|&card_type| MutationStep::DetachFormula {
                    formula: *formula,
                    card_type,
                })
                .collect()
        }
        (DependentEntity::CardValues(card_type), DependencyKind::LosesValues { .. }) => {
            vec![MutationStep::NullCardValues {
                property,
                card_type: *card_type,
            }]
        }
        _ => Vec::new(),
    }
}

fn rank(step: &MutationStep) -> u8 {
    match step {
        MutationStep::DeleteTransition { .. } => 0,
        MutationStep::DestroyView { .. } | MutationStep::DropViewColumn { .. } => 1,
        MutationStep::ClearCardDefault { .. } => 2,
        MutationStep::DetachFormula { .. } => 3,
        _ => 4,
    }
}
