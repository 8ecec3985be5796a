//! Read-only traversal from a proposed change to its dependents.

use crate::{
    ChangeProposal, Dependency, DependencyError, DependencyKind, DependencyResult, DependentEntity,
    PropertyChange, PropertyUpdate,
};
use mingle_analyzer::{CompiledFormula, FormulaAnalyzer, Kind};
use mingle_core::{CardTypeId, PropertyDefinitionId, ViewId};
use mingle_graph::CardStore;
use mingle_registry::{naming, AggregateDef, AggregateScope, PropertyDefinition, PropertyKind, Schema};
use std::collections::BTreeSet;
use tracing::debug;

/// Everything known about a proposal before it is classified.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyGraph {
    pub proposal: ChangeProposal,
    /// Card types the property is enabled on now.
    pub current_types: BTreeSet<CardTypeId>,
    /// Card types it will be enabled on afterwards.
    pub remaining_types: BTreeSet<CardTypeId>,
    /// Card types it loses.
    pub removed_types: BTreeSet<CardTypeId>,
    /// Card types it gains.
    pub added_types: BTreeSet<CardTypeId>,
    /// The formula as it will be after the change, when it is re-validated.
    pub formula: Option<CompiledFormula>,
    pub dependencies: Vec<Dependency>,
}

impl DependencyGraph {
    pub fn property(&self) -> PropertyDefinitionId {
        self.proposal.property
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.proposal.change, PropertyChange::Delete)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter()
    }
}

/// Builds the dependency graph of a proposal against a schema and its cards.
pub struct DependencyBuilder<'a> {
    schema: &'a Schema,
    cards: &'a CardStore,
}

impl<'a> DependencyBuilder<'a> {
    pub fn new(schema: &'a Schema, cards: &'a CardStore) -> Self {
        Self { schema, cards }
    }

    /// Find every dependent of the proposed change.
    ///
    /// Fails when the proposal names unknown entities or leaves an invalid
    /// formula behind.
    pub fn build(&self, proposal: &ChangeProposal) -> DependencyResult<DependencyGraph> {
        let property = self.schema.require_property(proposal.property)?;
        let current = self.schema.card_types_of(property.id);

        let remaining = match &proposal.change {
            PropertyChange::Update(PropertyUpdate {
                card_types: Some(types),
                ..
            }) => {
                for &ct in types {
                    self.schema.require_card_type(ct)?;
                }
                types.clone()
            }
            PropertyChange::Delete => BTreeSet::new(),
            _ => current.clone(),
        };
        let removed: BTreeSet<_> = current.difference(&remaining).copied().collect();
        let added: BTreeSet<_> = remaining.difference(&current).copied().collect();

        let formula = self.revalidate_formula(property, proposal, &current, &remaining)?;

        let mut deps = Vec::new();
        match &proposal.change {
            PropertyChange::Update(update) => {
                if !removed.is_empty() {
                    self.formulas_using(property, &removed, false, &mut deps);
                    self.aggregates_reading(property, &removed, false, &mut deps);
                }
                if remaining != current {
                    self.tree_managed(property, &mut deps);
                }
                if let Some(compiled) = &formula {
                    self.non_numeric_targets(property, compiled, &mut deps);
                }
                self.transitions(property, &removed, &mut deps);
                self.views_losing(property, &current, &remaining, &mut deps);
                self.card_defaults(property, &removed, &mut deps);
                self.card_values(property, &removed, true, &mut deps);
                if is_rename(property, update) {
                    self.renamed_references(property, &mut deps);
                }
            }
            PropertyChange::Delete => {
                self.formulas_using(property, &removed, true, &mut deps);
                self.aggregates_reading(property, &removed, true, &mut deps);
                self.tree_managed(property, &mut deps);
                self.transitions(property, &removed, &mut deps);
                self.views_of_deleted(property, &mut deps);
                self.card_defaults(property, &removed, &mut deps);
                self.card_values(property, &removed, false, &mut deps);
            }
            PropertyChange::Hide => self.views_of_hidden(property, &mut deps),
            PropertyChange::Unhide => {}
        }

        debug!(
            property = %property.name,
            action = proposal.action(),
            removed = removed.len(),
            dependents = deps.len(),
            "dependencies resolved"
        );

        Ok(DependencyGraph {
            proposal: proposal.clone(),
            current_types: current,
            remaining_types: remaining,
            removed_types: removed,
            added_types: added,
            formula,
            dependencies: deps,
        })
    }

    // ==================== Formulas ====================

    /// Compile the formula the property will carry, if it is a formula and
    /// either its text or its card types change.
    fn revalidate_formula(
        &self,
        property: &PropertyDefinition,
        proposal: &ChangeProposal,
        current: &BTreeSet<CardTypeId>,
        remaining: &BTreeSet<CardTypeId>,
    ) -> DependencyResult<Option<CompiledFormula>> {
        let Some(update) = proposal.as_update() else {
            return Ok(None);
        };
        let existing = property.kind.as_formula();
        let text = match (&update.formula, existing) {
            (Some(_), None) => return Err(DependencyError::NotAFormula(property.name.clone())),
            (Some(text), Some(_)) => text.as_str(),
            (None, Some(def)) if remaining != current => def.expression.as_str(),
            _ => return Ok(None),
        };
        let compiled = FormulaAnalyzer::new(self.schema).analyze(text, Some(property.id), remaining)?;
        Ok(Some(compiled))
    }

    /// Components a stored formula names; unreadable text names nothing.
    fn components_of(&self, formula: &PropertyDefinition) -> Vec<PropertyDefinitionId> {
        formula
            .kind
            .as_formula()
            .and_then(|def| FormulaAnalyzer::new(self.schema).components(&def.expression).ok())
            .unwrap_or_default()
    }

    fn uses(&self, formula: &PropertyDefinition, property: PropertyDefinitionId) -> bool {
        formula.id != property && self.components_of(formula).contains(&property)
    }

    /// Formulas that use the property as a component.
    fn formulas_using(
        &self,
        property: &PropertyDefinition,
        removed: &BTreeSet<CardTypeId>,
        deleting: bool,
        deps: &mut Vec<Dependency>,
    ) {
        for formula in self.schema.formulas() {
            if !self.uses(formula, property.id) {
                continue;
            }
            let formula_types = self.schema.card_types_of(formula.id);
            if deleting {
                deps.push(Dependency::new(
                    DependentEntity::Formula(formula.id),
                    DependencyKind::ComponentOf {
                        detached_from: formula_types,
                    },
                ));
                continue;
            }
            let detached_from: BTreeSet<_> = formula_types.intersection(removed).copied().collect();
            let left: BTreeSet<_> = formula_types.difference(&detached_from).copied().collect();
            let views = if detached_from.is_empty() {
                Vec::new()
            } else {
                self.views_dropping(formula.id, &formula_types, &left)
            };
            deps.push(Dependency::new(
                DependentEntity::Formula(formula.id),
                DependencyKind::ComponentOf { detached_from },
            ));
            for (view, filters) in views {
                let kind = if filters {
                    DependencyKind::FiltersOnFormula {
                        formula: formula.id,
                    }
                } else {
                    DependencyKind::ListsFormulaColumn {
                        formula: formula.id,
                    }
                };
                deps.push(Dependency::new(DependentEntity::View(view), kind));
            }
        }
    }

    /// Formulas whose text names the property and must be re-rendered.
    fn renamed_references(&self, property: &PropertyDefinition, deps: &mut Vec<Dependency>) {
        for formula in self.schema.formulas() {
            if self.uses(formula, property.id) {
                deps.push(Dependency::new(
                    DependentEntity::Formula(formula.id),
                    DependencyKind::RenamedReference,
                ));
            }
        }
    }

    // ==================== Aggregates and Trees ====================

    /// Card types whose cards an aggregate reads.
    fn scope_types(&self, aggregate: &PropertyDefinition, def: &AggregateDef) -> BTreeSet<CardTypeId> {
        match def.scope {
            AggregateScope::CardType(ct) => BTreeSet::from([ct]),
            AggregateScope::AllDescendants => {
                let Some(tree) = self.schema.tree(def.tree) else {
                    return BTreeSet::new();
                };
                self.schema
                    .card_types_of(aggregate.id)
                    .into_iter()
                    .flat_map(|ct| tree.descendant_types(ct))
                    .collect()
            }
        }
    }

    /// Aggregates that read the property directly or through a formula.
    fn aggregates_reading(
        &self,
        property: &PropertyDefinition,
        removed: &BTreeSet<CardTypeId>,
        deleting: bool,
        deps: &mut Vec<Dependency>,
    ) {
        for aggregate in self.schema.aggregates() {
            let Some(def) = aggregate.kind.as_aggregate() else {
                continue;
            };
            let Some(target) = def.target else {
                continue;
            };
            let scope = self.scope_types(aggregate, def);

            if target == property.id {
                let orphaned_on = scope.intersection(removed).copied().collect();
                deps.push(Dependency::new(
                    DependentEntity::Aggregate(aggregate.id),
                    DependencyKind::TargetOf { orphaned_on },
                ));
                continue;
            }

            let Some(formula) = self.schema.property(target) else {
                continue;
            };
            if !formula.kind.is_formula() || !self.uses(formula, property.id) {
                continue;
            }
            let formula_types = self.schema.card_types_of(formula.id);
            let orphaned_on = scope
                .iter()
                .filter(|ct| formula_types.contains(ct) && (deleting || removed.contains(ct)))
                .copied()
                .collect();
            deps.push(Dependency::new(
                DependentEntity::Aggregate(aggregate.id),
                DependencyKind::TargetViaFormula {
                    formula: formula.id,
                    orphaned_on,
                },
            ));
        }
    }

    /// Aggregates that would read a formula no longer producing numbers.
    fn non_numeric_targets(
        &self,
        property: &PropertyDefinition,
        compiled: &CompiledFormula,
        deps: &mut Vec<Dependency>,
    ) {
        if compiled.kind == Kind::Number {
            return;
        }
        for aggregate in self.schema.aggregates() {
            let targets_it = aggregate
                .kind
                .as_aggregate()
                .is_some_and(|def| def.target == Some(property.id));
            if targets_it {
                deps.push(Dependency::new(
                    DependentEntity::Aggregate(aggregate.id),
                    DependencyKind::NonNumericTarget,
                ));
            }
        }
    }

    /// Aggregate and tree relationship properties belong to their tree.
    fn tree_managed(&self, property: &PropertyDefinition, deps: &mut Vec<Dependency>) {
        let tree = match &property.kind {
            PropertyKind::Aggregate(def) => def.tree,
            PropertyKind::TreeRelationship { tree } => *tree,
            _ => return,
        };
        deps.push(Dependency::new(
            DependentEntity::Tree(tree),
            DependencyKind::ManagedByTree,
        ));
    }

    // ==================== Transitions, Views, Defaults ====================

    /// Transitions of the given card types that require or set the property.
    fn transitions(
        &self,
        property: &PropertyDefinition,
        card_types: &BTreeSet<CardTypeId>,
        deps: &mut Vec<Dependency>,
    ) {
        for &ct in card_types {
            for transition in self.schema.transitions_referencing(property.id, ct) {
                deps.push(Dependency::new(
                    DependentEntity::Transition(transition.id),
                    DependencyKind::References,
                ));
            }
        }
    }

    /// Card types a view covers; an empty filter covers every type.
    fn view_types(&self, types: &BTreeSet<CardTypeId>) -> BTreeSet<CardTypeId> {
        if types.is_empty() {
            self.schema.card_types().into_iter().map(|ct| ct.id).collect()
        } else {
            types.clone()
        }
    }

    /// Views that covered the property before and cover none of its types after.
    fn views_losing(
        &self,
        property: &PropertyDefinition,
        current: &BTreeSet<CardTypeId>,
        remaining: &BTreeSet<CardTypeId>,
        deps: &mut Vec<Dependency>,
    ) {
        for (view, filters) in self.views_dropping(property.id, current, remaining) {
            let kind = if filters {
                DependencyKind::FiltersOn
            } else {
                DependencyKind::ListsColumn
            };
            deps.push(Dependency::new(DependentEntity::View(view), kind));
        }
    }

    /// Views mentioning a property that covered one of its card types before
    /// and cover none after, each with whether it filters on the property.
    fn views_dropping(
        &self,
        property: PropertyDefinitionId,
        current: &BTreeSet<CardTypeId>,
        remaining: &BTreeSet<CardTypeId>,
    ) -> Vec<(ViewId, bool)> {
        self.schema
            .views()
            .filter(|view| view.references(property))
            .filter(|view| {
                let covered = self.view_types(&view.card_types);
                !covered.is_disjoint(current) && covered.is_disjoint(remaining)
            })
            .map(|view| (view.id, view.filters_on(property)))
            .collect()
    }

    fn views_of_deleted(&self, property: &PropertyDefinition, deps: &mut Vec<Dependency>) {
        for view in self.schema.views() {
            let kind = if view.filters_on(property.id) {
                DependencyKind::FiltersOn
            } else if view.lists_column(property.id) {
                DependencyKind::ListsColumn
            } else {
                continue;
            };
            deps.push(Dependency::new(DependentEntity::View(view.id), kind));
        }
    }

    fn views_of_hidden(&self, property: &PropertyDefinition, deps: &mut Vec<Dependency>) {
        for view in self.schema.views() {
            if view.references(property.id) {
                deps.push(Dependency::new(
                    DependentEntity::View(view.id),
                    DependencyKind::ReferencesHidden,
                ));
            }
        }
    }

    fn card_defaults(
        &self,
        property: &PropertyDefinition,
        card_types: &BTreeSet<CardTypeId>,
        deps: &mut Vec<Dependency>,
    ) {
        for &ct in card_types {
            let sets = self
                .schema
                .card_defaults(ct)
                .is_some_and(|d| d.sets(property.id));
            if sets {
                deps.push(Dependency::new(
                    DependentEntity::CardDefaults(ct),
                    DependencyKind::SetsDefault,
                ));
            }
        }
    }

    // ==================== Cards ====================

    fn card_values(
        &self,
        property: &PropertyDefinition,
        card_types: &BTreeSet<CardTypeId>,
        record_association: bool,
        deps: &mut Vec<Dependency>,
    ) {
        for &ct in card_types {
            let count = self.cards.count_with_value(ct, property.id);
            if count > 0 {
                deps.push(Dependency::new(
                    DependentEntity::CardValues(ct),
                    DependencyKind::LosesValues { count },
                ));
            }
            if record_association {
                deps.push(Dependency::new(
                    DependentEntity::CardTypeAssociation(ct),
                    DependencyKind::RemovedAssociation,
                ));
            }
        }
    }
}

fn is_rename(property: &PropertyDefinition, update: &PropertyUpdate) -> bool {
    update
        .name
        .as_deref()
        .is_some_and(|name| naming::normalize(name) != property.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingle_core::{TransitionId, Value, ViewId};
    use mingle_graph::Project;
    use mingle_registry::{AggregateFunction, CardListView, FilterOperator, SchemaBuilder, ViewFilter};
    use pretty_assertions::assert_eq;

    struct Fixture {
        project: Project,
        release: CardTypeId,
        story: CardTypeId,
        bug: CardTypeId,
        size: PropertyDefinitionId,
        status: PropertyDefinitionId,
        doubled: PropertyDefinitionId,
        total: PropertyDefinitionId,
        parent: PropertyDefinitionId,
        close: TransitionId,
        board: ViewId,
        columns: ViewId,
    }

    /// Release > Story tree; size on Story and Bug feeds `size times two`
    /// (Story only) and the `Total size` aggregate on Release.
    fn fixture() -> Fixture {
        let mut builder = SchemaBuilder::new();
        let release = builder.add_card_type("Release").done().unwrap();
        let story = builder.add_card_type("Story").done().unwrap();
        let bug = builder.add_card_type("Bug").done().unwrap();
        let size = builder
            .add_property("size", PropertyKind::FreeNumber)
            .on(&[story, bug])
            .done()
            .unwrap();
        let status = builder
            .add_property(
                "status",
                PropertyKind::ManagedList {
                    values: vec!["open".into(), "closed".into()],
                    numeric: false,
                },
            )
            .on(&[story, bug])
            .done()
            .unwrap();
        let doubled = builder
            .add_formula("size times two", "size * 2")
            .on(&[story])
            .done()
            .unwrap();
        let tree = builder
            .add_tree("Planning")
            .level(release)
            .level(story)
            .done()
            .unwrap();
        let parent = builder
            .add_property("Planning - Release", PropertyKind::TreeRelationship { tree })
            .on(&[story])
            .done()
            .unwrap();
        let total = builder
            .add_aggregate(
                "Total size",
                tree,
                release,
                AggregateFunction::Sum,
                AggregateScope::AllDescendants,
                Some(size),
            )
            .done()
            .unwrap();
        let close = builder
            .add_transition("close", bug)
            .requires(status, "open")
            .sets(status, "closed")
            .done()
            .unwrap();
        let board = builder
            .add_view("Bug board")
            .favorite()
            .card_types(&[bug])
            .group_by(status)
            .done()
            .unwrap();
        let columns = builder
            .add_view("Bug list")
            .card_types(&[bug])
            .column(status)
            .done()
            .unwrap();
        builder.card_default(bug, status, "open").unwrap();

        let mut project = Project::new("Mingle", builder.build().unwrap());
        project
            .create_card(bug, "Crash", [(status, Value::from("open"))])
            .unwrap();
        project
            .create_card(story, "Login", [(size, Value::Number(2.0))])
            .unwrap();

        Fixture {
            project,
            release,
            story,
            bug,
            size,
            status,
            doubled,
            total,
            parent,
            close,
            board,
            columns,
        }
    }

    fn build(f: &Fixture, proposal: ChangeProposal) -> DependencyResult<DependencyGraph> {
        DependencyBuilder::new(&f.project.schema, &f.project.cards).build(&proposal)
    }

    #[test]
    fn test_removing_card_type_finds_transitions_views_defaults_values() {
        // GIVEN status on Story and Bug
        let f = fixture();

        // WHEN Bug is dropped from status
        let graph = build(
            &f,
            ChangeProposal::update(f.status, PropertyUpdate::default().card_types([f.story])),
        )
        .unwrap();

        // THEN
        assert_eq!(graph.removed_types, BTreeSet::from([f.bug]));
        assert_eq!(
            graph.dependencies,
            vec![
                Dependency::new(DependentEntity::Transition(f.close), DependencyKind::References),
                Dependency::new(DependentEntity::View(f.board), DependencyKind::FiltersOn),
                Dependency::new(DependentEntity::View(f.columns), DependencyKind::ListsColumn),
                Dependency::new(DependentEntity::CardDefaults(f.bug), DependencyKind::SetsDefault),
                Dependency::new(
                    DependentEntity::CardValues(f.bug),
                    DependencyKind::LosesValues { count: 1 }
                ),
                Dependency::new(
                    DependentEntity::CardTypeAssociation(f.bug),
                    DependencyKind::RemovedAssociation
                ),
            ]
        );
    }

    #[test]
    fn test_removing_aggregate_target_from_scope_type() {
        // GIVEN size is summed from Story cards and used by `size times two` on Story
        let f = fixture();

        // WHEN Story is dropped from size
        let graph = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().card_types([f.bug])),
        )
        .unwrap();

        // THEN
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::Formula(f.doubled),
            DependencyKind::ComponentOf {
                detached_from: BTreeSet::from([f.story])
            }
        )));
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::Aggregate(f.total),
            DependencyKind::TargetOf {
                orphaned_on: BTreeSet::from([f.story])
            }
        )));
    }

    #[test]
    fn test_removing_unrelated_type_leaves_aggregate_intact() {
        // GIVEN the aggregate only reads Story cards
        let f = fixture();

        // WHEN Bug is dropped from size
        let graph = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().card_types([f.story])),
        )
        .unwrap();

        // THEN aggregate and formula are recorded with nothing orphaned
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::Aggregate(f.total),
            DependencyKind::TargetOf {
                orphaned_on: BTreeSet::new()
            }
        )));
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::Formula(f.doubled),
            DependencyKind::ComponentOf {
                detached_from: BTreeSet::new()
            }
        )));
    }

    #[test]
    fn test_same_card_types_has_no_dependents() {
        let f = fixture();
        let graph = build(
            &f,
            ChangeProposal::update(
                f.status,
                PropertyUpdate::default().card_types([f.story, f.bug]),
            ),
        )
        .unwrap();
        assert!(graph.is_empty());
        assert!(graph.removed_types.is_empty());
    }

    #[test]
    fn test_tree_properties_are_managed_by_tree() {
        let f = fixture();
        let graph = build(
            &f,
            ChangeProposal::update(f.parent, PropertyUpdate::default().card_types([f.story, f.bug])),
        )
        .unwrap();
        assert!(matches!(
            graph.dependencies.as_slice(),
            [Dependency {
                entity: DependentEntity::Tree(_),
                kind: DependencyKind::ManagedByTree
            }]
        ));
        assert_eq!(graph.added_types, BTreeSet::from([f.bug]));
    }

    #[test]
    fn test_rename_lists_formulas_to_rerender() {
        let f = fixture();
        let graph = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().name("story size")),
        )
        .unwrap();
        assert_eq!(
            graph.dependencies,
            vec![Dependency::new(
                DependentEntity::Formula(f.doubled),
                DependencyKind::RenamedReference
            )]
        );
    }

    #[test]
    fn test_formula_card_types_are_revalidated() {
        // GIVEN size times two uses size, which is not on Release
        let f = fixture();

        // WHEN the formula is enabled on Release
        let result = build(
            &f,
            ChangeProposal::update(
                f.doubled,
                PropertyUpdate::default().card_types([f.story, f.release]),
            ),
        );

        // THEN
        assert!(matches!(
            result,
            Err(DependencyError::Formula(
                mingle_analyzer::FormulaError::IncompatibleCardTypes { .. }
            ))
        ));
    }

    #[test]
    fn test_formula_text_on_non_formula_rejected() {
        let f = fixture();
        let result = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().formula("1 + 1")),
        );
        assert_eq!(result, Err(DependencyError::NotAFormula("size".into())));
    }

    #[test]
    fn test_delete_finds_everything() {
        // GIVEN
        let f = fixture();

        // WHEN size is deleted
        let graph = build(&f, ChangeProposal::delete(f.size)).unwrap();

        // THEN
        assert!(graph.is_delete());
        assert_eq!(graph.remaining_types, BTreeSet::new());
        let entities: Vec<_> = graph.iter().map(|d| d.entity.clone()).collect();
        assert_eq!(
            entities,
            vec![
                DependentEntity::Formula(f.doubled),
                DependentEntity::Aggregate(f.total),
                DependentEntity::CardValues(f.story),
            ]
        );
    }

    #[test]
    fn test_hide_finds_every_view() {
        let f = fixture();
        let graph = build(&f, ChangeProposal::hide(f.status)).unwrap();
        assert_eq!(
            graph.dependencies,
            vec![
                Dependency::new(DependentEntity::View(f.board), DependencyKind::ReferencesHidden),
                Dependency::new(DependentEntity::View(f.columns), DependencyKind::ReferencesHidden),
            ]
        );
    }

    #[test]
    fn test_unknown_property() {
        let f = fixture();
        let result = build(&f, ChangeProposal::unhide(PropertyDefinitionId::new(99)));
        assert!(matches!(result, Err(DependencyError::Registry(_))));
    }

    #[test]
    fn test_filter_view_survives_when_another_type_remains() {
        // GIVEN a view over every card type filtering on status
        let mut f = fixture();
        let view = add_open_everywhere_view(&mut f);

        // WHEN Bug is dropped but Story keeps status
        let graph = build(
            &f,
            ChangeProposal::update(f.status, PropertyUpdate::default().card_types([f.story])),
        )
        .unwrap();

        // THEN the all-types view is not a dependent
        assert!(!graph
            .iter()
            .any(|d| d.entity == DependentEntity::View(view)));
    }

    #[test]
    fn test_detached_formula_takes_its_views_along() {
        // GIVEN a Story view grouped by `size times two` and a Story list
        // showing it as a column
        let mut f = fixture();
        let schema = &mut f.project.schema;
        let grouped = schema.allocate_view_id();
        let mut view = CardListView::new(grouped, "Story doubles");
        view.card_types = BTreeSet::from([f.story]);
        view.group_by = Some(f.doubled);
        schema.put_view(view);
        let listed = schema.allocate_view_id();
        let mut view = CardListView::new(listed, "Story list");
        view.card_types = BTreeSet::from([f.story]);
        view.columns = vec![f.doubled];
        schema.put_view(view);

        // WHEN Story is dropped from size, detaching the formula from Story
        let graph = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().card_types([f.bug])),
        )
        .unwrap();

        // THEN both views depend on the detached formula
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::View(grouped),
            DependencyKind::FiltersOnFormula { formula: f.doubled }
        )));
        assert!(graph.dependencies.contains(&Dependency::new(
            DependentEntity::View(listed),
            DependencyKind::ListsFormulaColumn { formula: f.doubled }
        )));
    }

    #[test]
    fn test_formula_views_untouched_when_formula_keeps_its_types() {
        let mut f = fixture();
        let schema = &mut f.project.schema;
        let grouped = schema.allocate_view_id();
        let mut view = CardListView::new(grouped, "Story doubles");
        view.card_types = BTreeSet::from([f.story]);
        view.group_by = Some(f.doubled);
        schema.put_view(view);

        // Bug leaves size; the formula only lives on Story
        let graph = build(
            &f,
            ChangeProposal::update(f.size, PropertyUpdate::default().card_types([f.story])),
        )
        .unwrap();

        assert!(!graph
            .iter()
            .any(|d| d.entity == DependentEntity::View(grouped)));
    }

    fn add_open_everywhere_view(f: &mut Fixture) -> ViewId {
        let schema = &mut f.project.schema;
        let id = schema.allocate_view_id();
        let mut view = CardListView::new(id, "Open everywhere");
        view.filters.push(ViewFilter {
            property: f.status,
            operator: FilterOperator::Is,
            value: Value::from("open"),
        });
        schema.put_view(view);
        id
    }
}
