//! The project repository.

use crate::{CardStore, GraphError, GraphResult};
use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use mingle_registry::Schema;
use serde::{Deserialize, Serialize};

/// Storage seam for one project: its schema and its cards.
///
/// The engine reads through `schema`/`cards` while validating and writes
/// through the `_mut` accessors only inside a transaction.
pub trait ProjectRepository {
    fn schema(&self) -> &Schema;
    fn schema_mut(&mut self) -> &mut Schema;
    fn cards(&self) -> &CardStore;
    fn cards_mut(&mut self) -> &mut CardStore;
}

/// In-memory project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    pub schema: Schema,
    #[serde(default)]
    pub cards: CardStore,
}

impl Project {
    /// Create a project with no cards.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            cards: CardStore::new(),
        }
    }

    /// Create a card, checking each value's property is enabled on its type.
    pub fn create_card(
        &mut self,
        card_type: CardTypeId,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (PropertyDefinitionId, Value)>,
    ) -> GraphResult<CardId> {
        if self.schema.card_type(card_type).is_none() {
            return Err(GraphError::CardTypeNotFound(card_type));
        }
        let values: Vec<_> = values.into_iter().collect();
        for (property, _) in &values {
            if !self.schema.is_enabled(*property, card_type) {
                return Err(GraphError::PropertyNotEnabled {
                    property: *property,
                    card_type,
                });
            }
        }
        let id = self.cards.create_card(card_type, name);
        for (property, value) in values {
            self.cards.set_value(id, property, value)?;
        }
        Ok(id)
    }

    /// Set a value on an existing card, with the same check.
    pub fn set_card_value(
        &mut self,
        card: CardId,
        property: PropertyDefinitionId,
        value: Value,
    ) -> GraphResult<Value> {
        let card_type = self
            .cards
            .get(card)
            .map(|c| c.card_type)
            .ok_or(GraphError::CardNotFound(card))?;
        if !self.schema.is_enabled(property, card_type) {
            return Err(GraphError::PropertyNotEnabled {
                property,
                card_type,
            });
        }
        self.cards.set_value(card, property, value)
    }
}

impl ProjectRepository for Project {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    fn cards(&self) -> &CardStore {
        &self.cards
    }

    fn cards_mut(&mut self) -> &mut CardStore {
        &mut self.cards
    }
}
