//! Indexes for card lookups.

use mingle_core::{CardId, CardTypeId};
use std::collections::{BTreeSet, HashMap};

/// Card type index: CardTypeId -> Set<CardId>
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    index: HashMap<CardTypeId, BTreeSet<CardId>>,
}

impl TypeIndex {
    pub fn insert(&mut self, card_type: CardTypeId, card: CardId) {
        self.index.entry(card_type).or_default().insert(card);
    }

    pub fn remove(&mut self, card_type: CardTypeId, card: CardId) {
        if let Some(set) = self.index.get_mut(&card_type) {
            set.remove(&card);
            if set.is_empty() {
                self.index.remove(&card_type);
            }
        }
    }

    /// Cards of a type, in id order.
    pub fn get(&self, card_type: CardTypeId) -> impl Iterator<Item = CardId> + '_ {
        self.index
            .get(&card_type)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn count(&self, card_type: CardTypeId) -> usize {
        self.index.get(&card_type).map(BTreeSet::len).unwrap_or(0)
    }
}
