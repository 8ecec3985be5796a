//! Request and response types at the session boundary.

use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_dependency::{ChangeProposal, PropertyUpdate};
use mingle_registry::PropertyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::SessionError;

/// A request to edit a property definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub property_definition_id: PropertyDefinitionId,
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default)]
    pub new_description: Option<String>,
    #[serde(default)]
    pub new_card_type_ids: Option<BTreeSet<CardTypeId>>,
    #[serde(default)]
    pub formula_text: Option<String>,
    /// The user has seen and accepted the warnings.
    #[serde(default)]
    pub confirm: bool,
}

impl ChangeRequest {
    pub fn new(property: PropertyDefinitionId) -> Self {
        Self {
            property_definition_id: property,
            ..Self::default()
        }
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.new_name = Some(name.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.new_description = Some(description.into());
        self
    }

    pub fn card_types(mut self, card_types: impl IntoIterator<Item = CardTypeId>) -> Self {
        self.new_card_type_ids = Some(card_types.into_iter().collect());
        self
    }

    pub fn formula(mut self, text: impl Into<String>) -> Self {
        self.formula_text = Some(text.into());
        self
    }

    pub fn confirmed(mut self) -> Self {
        self.confirm = true;
        self
    }

    /// The engine-side proposal for this request.
    pub fn to_proposal(&self) -> ChangeProposal {
        ChangeProposal::update(
            self.property_definition_id,
            PropertyUpdate {
                name: self.new_name.clone(),
                description: self.new_description.clone(),
                card_types: self.new_card_type_ids.clone(),
                formula: self.formula_text.clone(),
            },
        )
    }
}

/// Outcome of a change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChangeResponse {
    Applied,
    Blocked { messages: Vec<String> },
    NeedsConfirmation { warnings: Vec<String> },
    /// Validation or formula errors; nothing was changed.
    Invalid { errors: Vec<String> },
    /// Applying failed and was rolled back.
    Failed { errors: Vec<String> },
}

impl ChangeResponse {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChangeResponse::Applied)
    }
}

impl<T> From<Result<T, SessionError>> for ChangeResponse {
    fn from(result: Result<T, SessionError>) -> Self {
        match result {
            Ok(_) => ChangeResponse::Applied,
            Err(SessionError::BlockingDependency { messages }) => {
                ChangeResponse::Blocked { messages }
            }
            Err(SessionError::ConfirmationRequired { warnings }) => {
                ChangeResponse::NeedsConfirmation { warnings }
            }
            Err(e) if e.is_rejection() => ChangeResponse::Invalid {
                errors: vec![e.to_string()],
            },
            Err(e) => ChangeResponse::Failed {
                errors: vec![e.to_string()],
            },
        }
    }
}

/// A property definition to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub card_type_ids: BTreeSet<CardTypeId>,
}

impl NewProperty {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            card_type_ids: BTreeSet::new(),
        }
    }

    pub fn on(mut self, card_types: impl IntoIterator<Item = CardTypeId>) -> Self {
        self.card_type_ids = card_types.into_iter().collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
