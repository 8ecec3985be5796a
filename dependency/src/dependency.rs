//! Dependency records.

use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, TreeId, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The artifact that depends on the changed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "id", rename_all = "snake_case")]
pub enum DependentEntity {
    Formula(PropertyDefinitionId),
    Aggregate(PropertyDefinitionId),
    Tree(TreeId),
    Transition(TransitionId),
    View(ViewId),
    CardDefaults(CardTypeId),
    CardValues(CardTypeId),
    CardTypeAssociation(CardTypeId),
}

/// Why the artifact depends on the changed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyKind {
    /// The formula uses the property; it loses the listed card types.
    ComponentOf { detached_from: BTreeSet<CardTypeId> },
    /// The aggregate reads the property; scope types where it would vanish.
    TargetOf { orphaned_on: BTreeSet<CardTypeId> },
    /// The aggregate reads a formula built on the property.
    TargetViaFormula {
        formula: PropertyDefinitionId,
        orphaned_on: BTreeSet<CardTypeId>,
    },
    /// The edited formula would stop producing numbers for this aggregate.
    NonNumericTarget,
    /// The property belongs to a tree; its card types are managed there.
    ManagedByTree,
    /// The transition requires or sets the property.
    References,
    /// The view filters, groups or colors by the property.
    FiltersOn,
    /// The view only shows the property as a column.
    ListsColumn,
    /// The view filters, groups or colors by a formula detached from every
    /// card type it covers.
    FiltersOnFormula { formula: PropertyDefinitionId },
    /// The view shows such a formula as a column.
    ListsFormulaColumn { formula: PropertyDefinitionId },
    /// The view mentions a property that is being hidden.
    ReferencesHidden,
    /// Card defaults of the type set the property.
    SetsDefault,
    /// Cards of the type hold values for the property.
    LosesValues { count: usize },
    /// The property is dropped from the card type.
    RemovedAssociation,
    /// The formula text names the property and will be re-rendered.
    RenamedReference,
}

/// One dependent artifact and the reason it depends on the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub entity: DependentEntity,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(entity: DependentEntity, kind: DependencyKind) -> Self {
        Self { entity, kind }
    }
}
