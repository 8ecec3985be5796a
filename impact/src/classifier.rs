//! Classification of dependents into impacts.

use crate::{Impact, ImpactReport};
use mingle_core::{messages, CardTypeId, PropertyDefinitionId, TreeId, ViewId};
use mingle_dependency::{Dependency, DependencyGraph, DependencyKind, DependentEntity};
use mingle_registry::{PropertyKind, Schema};
use std::collections::BTreeSet;
use tracing::info;

/// Classifies a dependency graph against the schema it was built from.
pub struct ImpactClassifier<'s> {
    schema: &'s Schema,
    confirm_silent: bool,
}

impl<'s> ImpactClassifier<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            confirm_silent: false,
        }
    }

    /// Require confirmation for silent impacts too.
    pub fn with_silent_confirmation(mut self, confirm_silent: bool) -> Self {
        self.confirm_silent = confirm_silent;
        self
    }

    /// Classify every dependent of the change.
    pub fn classify(&self, graph: &DependencyGraph) -> ImpactReport {
        let mut report = ImpactReport::new().with_silent_confirmation(self.confirm_silent);
        for dependency in graph.iter() {
            report.push(self.classify_one(graph, dependency));
        }
        info!(
            property = %self.property_name(graph.property()),
            blocking = report.blocking().count(),
            warnings = report.warnings().count(),
            silent = report.silent().count(),
            "impact classified"
        );
        report
    }

    fn classify_one(&self, graph: &DependencyGraph, dependency: &Dependency) -> Impact {
        let property = self.property_name(graph.property());
        let dep = dependency.clone();
        let deleting = graph.is_delete();

        match (&dependency.entity, &dependency.kind) {
            (DependentEntity::Formula(formula), DependencyKind::ComponentOf { detached_from }) => {
                let formula = self.property_name(*formula);
                if deleting {
                    Impact::blocking(messages::component_of_formula(&property, &formula), dep)
                } else if detached_from.is_empty() {
                    Impact::silent(messages::not_affected(&formula), dep)
                } else {
                    let types = self.card_type_names(detached_from);
                    Impact::warning(messages::formula_detached(&formula, &types, &property), dep)
                }
            }
            (DependentEntity::Aggregate(aggregate), DependencyKind::TargetOf { orphaned_on }) => {
                let aggregate = self.property_name(*aggregate);
                if deleting || !orphaned_on.is_empty() {
                    Impact::blocking(messages::target_of_aggregate(&property, &aggregate), dep)
                } else {
                    Impact::silent(messages::not_affected(&aggregate), dep)
                }
            }
            (
                DependentEntity::Aggregate(aggregate),
                DependencyKind::TargetViaFormula {
                    formula,
                    orphaned_on,
                },
            ) => {
                let aggregate = self.property_name(*aggregate);
                if deleting || !orphaned_on.is_empty() {
                    let formula = self.property_name(*formula);
                    Impact::blocking(
                        messages::component_of_aggregate_target(&property, &formula, &aggregate),
                        dep,
                    )
                } else {
                    Impact::silent(messages::not_affected(&aggregate), dep)
                }
            }
            (DependentEntity::Aggregate(aggregate), DependencyKind::NonNumericTarget) => {
                let aggregate = self.property_name(*aggregate);
                Impact::blocking(
                    messages::aggregate_target_not_numeric(&property, &aggregate),
                    dep,
                )
            }
            (DependentEntity::Tree(tree), DependencyKind::ManagedByTree) => {
                let is_aggregate = self
                    .schema
                    .property(graph.property())
                    .is_some_and(|p| matches!(p.kind, PropertyKind::Aggregate(_)));
                if is_aggregate {
                    Impact::blocking(messages::aggregate_managed_by_tree(&property), dep)
                } else {
                    Impact::blocking(
                        messages::managed_by_tree(&property, &self.tree_name(*tree)),
                        dep,
                    )
                }
            }
            (DependentEntity::Transition(id), _) => {
                let name = self
                    .schema
                    .transition(*id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| id.to_string());
                Impact::warning(messages::transitions_deleted(&[name]), dep)
            }
            (DependentEntity::View(id), DependencyKind::ListsColumn) => {
                let view = self.view_name(*id).0;
                Impact::silent(messages::column_dropped(&view, &property), dep)
            }
            (DependentEntity::View(id), DependencyKind::ListsFormulaColumn { formula }) => {
                let view = self.view_name(*id).0;
                let formula = self.property_name(*formula);
                Impact::silent(messages::column_dropped(&view, &formula), dep)
            }
            (DependentEntity::View(id), _) => {
                let (view, favorite) = self.view_name(*id);
                Impact::warning(messages::views_deleted(&[view], favorite), dep)
            }
            (DependentEntity::CardDefaults(ct), _) => {
                let card_type = self.schema.card_type_name(*ct);
                Impact::warning(messages::card_defaults_cleared(&card_type, &property), dep)
            }
            (DependentEntity::CardValues(ct), DependencyKind::LosesValues { count }) => {
                let card_type = self.schema.card_type_name(*ct);
                Impact::warning(messages::cards_lose_values(*count, &card_type, &property), dep)
            }
            (DependentEntity::CardTypeAssociation(ct), _) => {
                let card_type = self.schema.card_type_name(*ct);
                Impact::silent(messages::association_removed(&card_type, &property), dep)
            }
            (DependentEntity::Formula(formula), _) => {
                let formula = self.property_name(*formula);
                Impact::silent(messages::reference_renamed(&formula), dep)
            }
            (_, _) => Impact::silent(messages::not_affected(&property), dep),
        }
    }

    // ==================== Names ====================

    fn property_name(&self, id: PropertyDefinitionId) -> String {
        self.schema
            .property(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn card_type_names(&self, ids: &BTreeSet<CardTypeId>) -> String {
        self.schema
            .card_types()
            .into_iter()
            .filter(|ct| ids.contains(&ct.id))
            .map(|ct| ct.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn tree_name(&self, id: TreeId) -> String {
        self.schema
            .tree(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// View name and whether it is a team favorite.
    fn view_name(&self, id: ViewId) -> (String, bool) {
        self.schema
            .view(id)
            .map(|v| (v.name.clone(), v.favorite))
            .unwrap_or_else(|| (id.to_string(), false))
    }
}
