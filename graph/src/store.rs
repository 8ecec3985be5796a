//! Card storage implementation.

use crate::index::TypeIndex;
use crate::{Card, GraphError, GraphResult};
use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The in-memory card storage.
///
/// Serializes as the list of cards; the index and the allocators are
/// rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct CardStore {
    /// Card storage
    cards: BTreeMap<CardId, Card>,
    /// Card type index
    type_index: TypeIndex,
    /// Last allocated card id
    last_id: u64,
    /// Last allocated card number
    last_number: u32,
}

impl CardStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Card Operations ====================

    /// Create a card with the next id and number.
    pub fn create_card(&mut self, card_type: CardTypeId, name: impl Into<String>) -> CardId {
        self.last_id += 1;
        self.last_number += 1;
        let card = Card::new(CardId::new(self.last_id), self.last_number, name, card_type);
        let id = card.id;
        self.insert(card);
        id
    }

    /// Insert or replace a card; returns the card it replaced.
    pub fn insert(&mut self, card: Card) -> Option<Card> {
        self.last_id = self.last_id.max(card.id.raw());
        self.last_number = self.last_number.max(card.number);
        if let Some(old) = self.cards.get(&card.id) {
            self.type_index.remove(old.card_type, old.id);
        }
        self.type_index.insert(card.card_type, card.id);
        self.cards.insert(card.id, card)
    }

    /// Get a card by ID.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Remove a card.
    pub fn remove(&mut self, id: CardId) -> GraphResult<Card> {
        let card = self.cards.remove(&id).ok_or(GraphError::CardNotFound(id))?;
        self.type_index.remove(card.card_type, id);
        Ok(card)
    }

    /// Set a property value on a card; returns the previous value.
    pub fn set_value(
        &mut self,
        id: CardId,
        property: PropertyDefinitionId,
        value: Value,
    ) -> GraphResult<Value> {
        let card = self.cards.get_mut(&id).ok_or(GraphError::CardNotFound(id))?;
        Ok(card.set_value(property, value))
    }

    // ==================== Queries ====================

    /// Find cards of a card type, in id order.
    pub fn cards_of_type(&self, card_type: CardTypeId) -> impl Iterator<Item = &Card> + '_ {
        self.type_index
            .get(card_type)
            .filter_map(move |id| self.cards.get(&id))
    }

    /// Count cards of a card type.
    pub fn count_of_type(&self, card_type: CardTypeId) -> usize {
        self.type_index.count(card_type)
    }

    /// Count cards of a card type holding a value for a property.
    pub fn count_with_value(&self, card_type: CardTypeId, property: PropertyDefinitionId) -> usize {
        self.cards_of_type(card_type)
            .filter(|c| c.has_value(property))
            .count()
    }

    /// Find a card by its number.
    pub fn find_by_number(&self, number: u32) -> Option<&Card> {
        self.cards.values().find(|c| c.number == number)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.values()
    }
}

impl From<Vec<Card>> for CardStore {
    fn from(cards: Vec<Card>) -> Self {
        let mut store = CardStore::new();
        for card in cards {
            store.insert(card);
        }
        store
    }
}

impl From<CardStore> for Vec<Card> {
    fn from(store: CardStore) -> Self {
        store.cards.into_values().collect()
    }
}

impl PartialEq for CardStore {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}
