//! The primitive steps of a change plan.

use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, ViewId};
use mingle_registry::PropertyDefinition;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One idempotent change to the project.
///
/// Applying a step a second time finds nothing left to do and writes nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum MutationStep {
    /// Insert a new, validated property definition.
    CreateProperty {
        definition: PropertyDefinition,
    },
    /// Rewrite a formula's text so it names a renamed component.
    RerenderFormula {
        formula: PropertyDefinitionId,
        from: String,
        to: String,
    },
    DeleteTransition {
        id: TransitionId,
    },
    DestroyView {
        id: ViewId,
    },
    DropViewColumn {
        view: ViewId,
        property: PropertyDefinitionId,
    },
    /// Stop a view filtering on a card type that is going away.
    NarrowView {
        view: ViewId,
        card_type: CardTypeId,
    },
    ClearCardDefault {
        card_type: CardTypeId,
        property: PropertyDefinitionId,
    },
    /// Disable a formula on a card type and clear its computed values there.
    DetachFormula {
        formula: PropertyDefinitionId,
        card_type: CardTypeId,
    },
    NullCardValues {
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    },
    /// Write new attributes; `None` leaves an attribute as it is.
    UpdateAttributes {
        property: PropertyDefinitionId,
        name: Option<String>,
        description: Option<String>,
        card_types: Option<BTreeSet<CardTypeId>>,
        formula: Option<String>,
    },
    /// Compute the formula on every card of its card types.
    RecomputeFormula {
        formula: PropertyDefinitionId,
    },
    HideProperty {
        property: PropertyDefinitionId,
    },
    UnhideProperty {
        property: PropertyDefinitionId,
    },
    /// Remove the definition, its associations and all its card values.
    DeleteProperty {
        property: PropertyDefinitionId,
    },
    /// Remove a card type and its card defaults.
    DeleteCardType {
        card_type: CardTypeId,
    },
}

impl MutationStep {
    /// Short step name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            MutationStep::CreateProperty { .. } => "create_property",
            MutationStep::RerenderFormula { .. } => "rerender_formula",
            MutationStep::DeleteTransition { .. } => "delete_transition",
            MutationStep::DestroyView { .. } => "destroy_view",
            MutationStep::DropViewColumn { .. } => "drop_view_column",
            MutationStep::NarrowView { .. } => "narrow_view",
            MutationStep::ClearCardDefault { .. } => "clear_card_default",
            MutationStep::DetachFormula { .. } => "detach_formula",
            MutationStep::NullCardValues { .. } => "null_card_values",
            MutationStep::UpdateAttributes { .. } => "update_attributes",
            MutationStep::RecomputeFormula { .. } => "recompute_formula",
            MutationStep::HideProperty { .. } => "hide_property",
            MutationStep::UnhideProperty { .. } => "unhide_property",
            MutationStep::DeleteProperty { .. } => "delete_property",
            MutationStep::DeleteCardType { .. } => "delete_card_type",
        }
    }
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationStep::CreateProperty { definition } => {
                write!(f, "create_property({}, {})", definition.id, definition.name)
            }
            MutationStep::RerenderFormula { formula, from, to } => {
                write!(f, "rerender_formula({}, {} -> {})", formula, from, to)
            }
            MutationStep::DeleteTransition { id } => write!(f, "delete_transition({})", id),
            MutationStep::DestroyView { id } => write!(f, "destroy_view({})", id),
            MutationStep::DropViewColumn { view, property } => {
                write!(f, "drop_view_column({}, {})", view, property)
            }
            MutationStep::NarrowView { view, card_type } => {
                write!(f, "narrow_view({}, {})", view, card_type)
            }
            MutationStep::ClearCardDefault {
                card_type,
                property,
            } => write!(f, "clear_card_default({}, {})", card_type, property),
            MutationStep::DetachFormula { formula, card_type } => {
                write!(f, "detach_formula({}, {})", formula, card_type)
            }
            MutationStep::NullCardValues {
                property,
                card_type,
            } => write!(f, "null_card_values({}, {})", property, card_type),
            MutationStep::UpdateAttributes { property, .. } => {
                write!(f, "update_attributes({})", property)
            }
            MutationStep::RecomputeFormula { formula } => {
                write!(f, "recompute_formula({})", formula)
            }
            MutationStep::HideProperty { property } => write!(f, "hide_property({})", property),
            MutationStep::UnhideProperty { property } => {
                write!(f, "unhide_property({})", property)
            }
            MutationStep::DeleteProperty { property } => {
                write!(f, "delete_property({})", property)
            }
            MutationStep::DeleteCardType { card_type } => {
                write!(f, "delete_card_type({})", card_type)
            }
        }
    }
}
