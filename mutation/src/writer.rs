//! Journaled writes: every change to the project records its undo entry.

use crate::{UndoEntry, UndoLog};
use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, TransitionId, Value, ViewId};
use mingle_graph::{CardStore, GraphResult, ProjectRepository};
use mingle_registry::{CardDefaults, CardListView, PropertyDefinition, RegistryResult, Schema};

/// Write access to a project that never writes without logging.
pub struct Writer<'a, R: ProjectRepository> {
    repo: &'a mut R,
    log: &'a mut UndoLog,
}

impl<'a, R: ProjectRepository> Writer<'a, R> {
    pub fn new(repo: &'a mut R, log: &'a mut UndoLog) -> Self {
        Self { repo, log }
    }

    pub fn schema(&self) -> &Schema {
        self.repo.schema()
    }

    pub fn cards(&self) -> &CardStore {
        self.repo.cards()
    }

    /// Number of writes logged so far.
    pub fn writes(&self) -> usize {
        self.log.len()
    }

    // ==================== Schema ====================

    pub fn put_property(&mut self, property: PropertyDefinition) {
        let id = property.id;
        let before = self.repo.schema_mut().put_property(property);
        self.log.record(UndoEntry::Property { id, before });
    }

    pub fn remove_property(&mut self, id: PropertyDefinitionId) -> bool {
        let removed = self.repo.schema_mut().remove_property(id);
        self.logged(removed, |before| UndoEntry::Property {
            id,
            before: Some(before),
        })
    }

    pub fn associate(
        &mut self,
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    ) -> RegistryResult<bool> {
        let before = self.repo.schema_mut().associate(property, card_type)?;
        Ok(self.logged(before, |before| UndoEntry::CardType { before }))
    }

    pub fn disassociate(
        &mut self,
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    ) -> RegistryResult<bool> {
        let before = self.repo.schema_mut().disassociate(property, card_type)?;
        Ok(self.logged(before, |before| UndoEntry::CardType { before }))
    }

    /// Remove a card type; a type that is already gone writes nothing.
    pub fn remove_card_type(&mut self, id: CardTypeId) -> RegistryResult<bool> {
        if self.repo.schema().card_type(id).is_none() {
            return Ok(false);
        }
        let before = self.repo.schema_mut().remove_card_type(id)?;
        self.log.record(UndoEntry::CardType { before });
        Ok(true)
    }

    pub fn remove_transition(&mut self, id: TransitionId) -> bool {
        let removed = self.repo.schema_mut().remove_transition(id);
        self.logged(removed, |before| UndoEntry::Transition {
            id,
            before: Some(before),
        })
    }

    pub fn put_view(&mut self, view: CardListView) {
        let id = view.id;
        let before = self.repo.schema_mut().put_view(view);
        self.log.record(UndoEntry::View { id, before });
    }

    pub fn remove_view(&mut self, id: ViewId) -> bool {
        let removed = self.repo.schema_mut().remove_view(id);
        self.logged(removed, |before| UndoEntry::View {
            id,
            before: Some(before),
        })
    }

    pub fn put_card_defaults(&mut self, defaults: CardDefaults) {
        let card_type = defaults.card_type;
        let before = self.repo.schema_mut().put_card_defaults(defaults);
        self.log.record(UndoEntry::CardDefaults { card_type, before });
    }

    pub fn remove_card_defaults(&mut self, card_type: CardTypeId) -> bool {
        let removed = self.repo.schema_mut().remove_card_defaults(card_type);
        self.logged(removed, |before| UndoEntry::CardDefaults {
            card_type,
            before: Some(before),
        })
    }

    // ==================== Cards ====================

    /// Set a card value; returns whether it changed.
    pub fn set_card_value(
        &mut self,
        card: CardId,
        property: PropertyDefinitionId,
        value: Value,
    ) -> GraphResult<bool> {
        let before = self.repo.cards_mut().set_value(card, property, value.clone())?;
        if before == value {
            return Ok(false);
        }
        self.log.record(UndoEntry::CardValue {
            card,
            property,
            before,
        });
        Ok(true)
    }

    fn logged<T>(&mut self, before: Option<T>, entry: impl FnOnce(T) -> UndoEntry) -> bool {
        match before {
            Some(before) => {
                self.log.record(entry(before));
                true
            }
            None => false,
        }
    }
}
