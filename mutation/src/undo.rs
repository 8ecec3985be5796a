//! Undo records for primitive writes.

use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, TransitionId, Value, ViewId};
use mingle_graph::{GraphResult, ProjectRepository};
use mingle_registry::{CardDefaults, CardListView, CardType, PropertyDefinition, Transition};
use tracing::warn;

/// What a single write replaced.
///
/// `None` means the entity did not exist before the write.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoEntry {
    Property {
        id: PropertyDefinitionId,
        before: Option<PropertyDefinition>,
    },
    /// Card types carry the property associations.
    CardType { before: CardType },
    Transition {
        id: TransitionId,
        before: Option<Transition>,
    },
    View {
        id: ViewId,
        before: Option<CardListView>,
    },
    CardDefaults {
        card_type: CardTypeId,
        before: Option<CardDefaults>,
    },
    CardValue {
        card: CardId,
        property: PropertyDefinitionId,
        before: Value,
    },
}

impl UndoEntry {
    /// Put back what the write replaced.
    pub fn revert<R: ProjectRepository + ?Sized>(self, repo: &mut R) -> GraphResult<()> {
        if let UndoEntry::CardValue {
            card,
            property,
            before,
        } = self
        {
            repo.cards_mut().set_value(card, property, before)?;
            return Ok(());
        }
        let schema = repo.schema_mut();
        match self {
            UndoEntry::Property { id, before } => match before {
                Some(property) => {
                    schema.put_property(property);
                }
                None => {
                    schema.remove_property(id);
                }
            },
            UndoEntry::CardType { before } => {
                schema.put_card_type(before);
            }
            UndoEntry::Transition { id, before } => match before {
                Some(transition) => {
                    schema.put_transition(transition);
                }
                None => {
                    schema.remove_transition(id);
                }
            },
            UndoEntry::View { id, before } => match before {
                Some(view) => {
                    schema.put_view(view);
                }
                None => {
                    schema.remove_view(id);
                }
            },
            UndoEntry::CardDefaults { card_type, before } => match before {
                Some(defaults) => {
                    schema.put_card_defaults(defaults);
                }
                None => {
                    schema.remove_card_defaults(card_type);
                }
            },
            UndoEntry::CardValue { .. } => {}
        }
        Ok(())
    }
}

/// Ordered log of undo entries, newest last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UndoEntry> {
        self.entries.iter()
    }

    /// Forget every entry; the writes stay.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Revert every entry, newest first, and empty the log.
    ///
    /// Returns the number of entries reverted.
    pub fn rollback<R: ProjectRepository + ?Sized>(&mut self, repo: &mut R) -> usize {
        let mut reverted = 0;
        while let Some(entry) = self.entries.pop() {
            if let Err(e) = entry.revert(repo) {
                warn!(error = %e, "undo entry could not be reverted");
            }
            reverted += 1;
        }
        reverted
    }
}
