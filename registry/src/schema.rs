//! The Schema - project configuration lookup and editing.

use crate::naming::{same_name, NameRules};
use crate::{
    CardDefaults, CardListView, CardType, PropertyDefinition, RegistryError, RegistryResult,
    Transition, TreeConfig,
};
use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, TreeId, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Next raw id per entity namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequences {
    pub property: u64,
    pub card_type: u64,
    pub tree: u64,
    pub transition: u64,
    pub view: u64,
}

/// Project schema: property definitions, card types and everything that
/// refers to them by id.
///
/// Every write method returns the value it replaced so that callers can
/// restore it; the transaction layer relies on this to undo changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    properties: BTreeMap<PropertyDefinitionId, PropertyDefinition>,
    #[serde(default)]
    card_types: BTreeMap<CardTypeId, CardType>,
    #[serde(default)]
    trees: BTreeMap<TreeId, TreeConfig>,
    #[serde(default)]
    transitions: BTreeMap<TransitionId, Transition>,
    #[serde(default)]
    views: BTreeMap<ViewId, CardListView>,
    #[serde(default)]
    card_defaults: BTreeMap<CardTypeId, CardDefaults>,
    #[serde(default)]
    sequences: Sequences,
}

impl Schema {
    /// Create an empty schema (use SchemaBuilder for fixtures).
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Id Allocation ====================

    pub fn allocate_property_id(&mut self) -> PropertyDefinitionId {
        self.sequences.property += 1;
        PropertyDefinitionId::new(self.sequences.property)
    }

    pub fn allocate_card_type_id(&mut self) -> CardTypeId {
        self.sequences.card_type += 1;
        CardTypeId::new(self.sequences.card_type)
    }

    pub fn allocate_tree_id(&mut self) -> TreeId {
        self.sequences.tree += 1;
        TreeId::new(self.sequences.tree)
    }

    pub fn allocate_transition_id(&mut self) -> TransitionId {
        self.sequences.transition += 1;
        TransitionId::new(self.sequences.transition)
    }

    pub fn allocate_view_id(&mut self) -> ViewId {
        self.sequences.view += 1;
        ViewId::new(self.sequences.view)
    }

    // ==================== Property Lookups ====================

    /// Get a property definition by id, hidden or not.
    pub fn property(&self, id: PropertyDefinitionId) -> Option<&PropertyDefinition> {
        self.properties.get(&id)
    }

    /// Get a property definition by id or fail.
    pub fn require_property(&self, id: PropertyDefinitionId) -> RegistryResult<&PropertyDefinition> {
        self.properties
            .get(&id)
            .ok_or(RegistryError::UnknownProperty(id))
    }

    /// Find a visible property by name (case-insensitive).
    pub fn find_property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties
            .values()
            .find(|p| !p.hidden && same_name(&p.name, name))
    }

    /// Find a property by name including hidden ones.
    pub fn find_property_with_hidden(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.values().find(|p| same_name(&p.name, name))
    }

    /// Get all property definitions, ordered by id.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    /// Get all formula property definitions.
    pub fn formulas(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values().filter(|p| p.kind.is_formula())
    }

    /// Get all aggregate property definitions.
    pub fn aggregates(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values().filter(|p| p.kind.is_aggregate())
    }

    /// Fail if another property already uses this name.
    pub fn ensure_property_name_free(
        &self,
        name: &str,
        except: Option<PropertyDefinitionId>,
    ) -> RegistryResult<()> {
        let taken = self
            .properties
            .values()
            .any(|p| Some(p.id) != except && same_name(&p.name, name));
        if taken {
            return Err(RegistryError::NameTaken(name.to_string()));
        }
        Ok(())
    }

    /// Validate a property name against the rules and the existing names.
    pub fn validate_property_name(
        &self,
        raw: &str,
        rules: &NameRules,
        except: Option<PropertyDefinitionId>,
    ) -> RegistryResult<String> {
        let name = rules.validate(raw)?;
        self.ensure_property_name_free(&name, except)?;
        Ok(name)
    }

    // ==================== Property Writes ====================

    /// Insert or replace a property definition; returns the previous one.
    pub fn put_property(&mut self, property: PropertyDefinition) -> Option<PropertyDefinition> {
        self.properties.insert(property.id, property)
    }

    /// Remove a property definition. Card-type associations are left to the caller.
    pub fn remove_property(&mut self, id: PropertyDefinitionId) -> Option<PropertyDefinition> {
        self.properties.remove(&id)
    }

    // ==================== Card Types ====================

    pub fn card_type(&self, id: CardTypeId) -> Option<&CardType> {
        self.card_types.get(&id)
    }

    pub fn require_card_type(&self, id: CardTypeId) -> RegistryResult<&CardType> {
        self.card_types
            .get(&id)
            .ok_or(RegistryError::UnknownCardType(id))
    }

    /// Find a card type by name (case-insensitive).
    pub fn find_card_type(&self, name: &str) -> Option<&CardType> {
        self.card_types.values().find(|t| same_name(&t.name, name))
    }

    /// Get all card types ordered by position.
    pub fn card_types(&self) -> Vec<&CardType> {
        let mut types: Vec<&CardType> = self.card_types.values().collect();
        types.sort_by_key(|t| (t.position, t.id));
        types
    }

    pub fn card_type_count(&self) -> usize {
        self.card_types.len()
    }

    /// Display name of a card type, falling back to its id.
    pub fn card_type_name(&self, id: CardTypeId) -> String {
        self.card_types
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Insert or replace a card type; returns the previous one.
    pub fn put_card_type(&mut self, card_type: CardType) -> Option<CardType> {
        self.card_types.insert(card_type.id, card_type)
    }

    /// Remove a card type. Refuses to remove the last one.
    pub fn remove_card_type(&mut self, id: CardTypeId) -> RegistryResult<CardType> {
        if !self.card_types.contains_key(&id) {
            return Err(RegistryError::UnknownCardType(id));
        }
        if self.card_types.len() == 1 {
            return Err(RegistryError::LastCardType);
        }
        self.card_types
            .remove(&id)
            .ok_or(RegistryError::UnknownCardType(id))
    }

    // ==================== Associations ====================

    /// Card types a property is enabled on.
    pub fn card_types_of(&self, property: PropertyDefinitionId) -> BTreeSet<CardTypeId> {
        self.card_types
            .values()
            .filter(|t| t.has_property(property))
            .map(|t| t.id)
            .collect()
    }

    /// Check if a property is enabled on a card type.
    pub fn is_enabled(&self, property: PropertyDefinitionId, card_type: CardTypeId) -> bool {
        self.card_types
            .get(&card_type)
            .map(|t| t.has_property(property))
            .unwrap_or(false)
    }

    /// Enable a property on a card type (appended to the display order).
    /// Returns the card type as it was before, if anything changed.
    pub fn associate(
        &mut self,
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    ) -> RegistryResult<Option<CardType>> {
        let ct = self
            .card_types
            .get_mut(&card_type)
            .ok_or(RegistryError::UnknownCardType(card_type))?;
        if ct.has_property(property) {
            return Ok(None);
        }
        let before = ct.clone();
        ct.properties.push(property);
        Ok(Some(before))
    }

    /// Disable a property on a card type.
    /// Returns the card type as it was before, if anything changed.
    pub fn disassociate(
        &mut self,
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    ) -> RegistryResult<Option<CardType>> {
        let ct = self
            .card_types
            .get_mut(&card_type)
            .ok_or(RegistryError::UnknownCardType(card_type))?;
        if !ct.has_property(property) {
            return Ok(None);
        }
        let before = ct.clone();
        ct.properties.retain(|&p| p != property);
        Ok(Some(before))
    }

    // ==================== Trees ====================

    pub fn tree(&self, id: TreeId) -> Option<&TreeConfig> {
        self.trees.get(&id)
    }

    pub fn trees(&self) -> impl Iterator<Item = &TreeConfig> {
        self.trees.values()
    }

    pub fn put_tree(&mut self, tree: TreeConfig) -> Option<TreeConfig> {
        self.trees.insert(tree.id, tree)
    }

    // ==================== Transitions ====================

    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(&id)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    /// Transitions of a card type that read or write a property.
    pub fn transitions_referencing(
        &self,
        property: PropertyDefinitionId,
        card_type: CardTypeId,
    ) -> Vec<&Transition> {
        self.transitions
            .values()
            .filter(|t| t.card_type == card_type && t.references(property))
            .collect()
    }

    pub fn put_transition(&mut self, transition: Transition) -> Option<Transition> {
        self.transitions.insert(transition.id, transition)
    }

    pub fn remove_transition(&mut self, id: TransitionId) -> Option<Transition> {
        self.transitions.remove(&id)
    }

    // ==================== Views ====================

    pub fn view(&self, id: ViewId) -> Option<&CardListView> {
        self.views.get(&id)
    }

    pub fn views(&self) -> impl Iterator<Item = &CardListView> {
        self.views.values()
    }

    pub fn put_view(&mut self, view: CardListView) -> Option<CardListView> {
        self.views.insert(view.id, view)
    }

    pub fn remove_view(&mut self, id: ViewId) -> Option<CardListView> {
        self.views.remove(&id)
    }

    // ==================== Card Defaults ====================

    pub fn card_defaults(&self, card_type: CardTypeId) -> Option<&CardDefaults> {
        self.card_defaults.get(&card_type)
    }

    pub fn put_card_defaults(&mut self, defaults: CardDefaults) -> Option<CardDefaults> {
        self.card_defaults.insert(defaults.card_type, defaults)
    }

    pub fn remove_card_defaults(&mut self, card_type: CardTypeId) -> Option<CardDefaults> {
        self.card_defaults.remove(&card_type)
    }
}
