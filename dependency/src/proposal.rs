//! Proposed changes to a property definition.

use mingle_core::{CardTypeId, PropertyDefinitionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// New attribute values; `None` leaves an attribute as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub card_types: Option<BTreeSet<CardTypeId>>,
    #[serde(default)]
    pub formula: Option<String>,
}

impl PropertyUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn card_types(mut self, card_types: impl IntoIterator<Item = CardTypeId>) -> Self {
        self.card_types = Some(card_types.into_iter().collect());
        self
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

/// What happens to the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PropertyChange {
    Update(PropertyUpdate),
    Hide,
    Unhide,
    Delete,
}

/// A change requested for one property definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeProposal {
    pub property: PropertyDefinitionId,
    pub change: PropertyChange,
}

impl ChangeProposal {
    pub fn update(property: PropertyDefinitionId, update: PropertyUpdate) -> Self {
        Self {
            property,
            change: PropertyChange::Update(update),
        }
    }

    pub fn hide(property: PropertyDefinitionId) -> Self {
        Self {
            property,
            change: PropertyChange::Hide,
        }
    }

    pub fn unhide(property: PropertyDefinitionId) -> Self {
        Self {
            property,
            change: PropertyChange::Unhide,
        }
    }

    pub fn delete(property: PropertyDefinitionId) -> Self {
        Self {
            property,
            change: PropertyChange::Delete,
        }
    }

    /// Get the attribute update, if this is one.
    pub fn as_update(&self) -> Option<&PropertyUpdate> {
        match &self.change {
            PropertyChange::Update(update) => Some(update),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn action(&self) -> &'static str {
        match self.change {
            PropertyChange::Update(_) => "update",
            PropertyChange::Hide => "hide",
            PropertyChange::Unhide => "unhide",
            PropertyChange::Delete => "delete",
        }
    }
}
