//! Cards.

use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A card: one value per enabled property. Unset values are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Project-wide card number, shown as `#number`.
    pub number: u32,
    pub name: String,
    pub card_type: CardTypeId,
    #[serde(default)]
    pub values: BTreeMap<PropertyDefinitionId, Value>,
}

impl Card {
    pub fn new(id: CardId, number: u32, name: impl Into<String>, card_type: CardTypeId) -> Self {
        Self {
            id,
            number,
            name: name.into(),
            card_type,
            values: BTreeMap::new(),
        }
    }

    /// Get a value; unset properties read as `Value::Null`.
    pub fn value(&self, property: PropertyDefinitionId) -> &Value {
        const NULL: &Value = &Value::Null;
        self.values.get(&property).unwrap_or(NULL)
    }

    /// Check if the card holds a value for a property.
    pub fn has_value(&self, property: PropertyDefinitionId) -> bool {
        self.values.get(&property).is_some_and(|v| !v.is_null())
    }

    /// Set a value, returning the previous one. Setting Null clears it.
    pub fn set_value(&mut self, property: PropertyDefinitionId, value: Value) -> Value {
        let old = if value.is_null() {
            self.values.remove(&property)
        } else {
            self.values.insert(property, value)
        };
        old.unwrap_or_default()
    }
}
