//! Project schema definition types.

use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, TreeId, Value, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Formula configuration of a formula property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaDef {
    /// Expression text as entered (or re-rendered after a rename).
    pub expression: String,
    /// Treat unset numeric components as zero when evaluating.
    #[serde(default)]
    pub null_is_zero: bool,
}

impl FormulaDef {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            null_is_zero: false,
        }
    }

    pub fn null_is_zero(mut self) -> Self {
        self.null_is_zero = true;
        self
    }
}

/// Aggregation function of an aggregate property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Sum,
    Count,
    Average,
    Min,
    Max,
}

impl AggregateFunction {
    /// Whether the function reads a target property.
    pub fn needs_target(&self) -> bool {
        !matches!(self, AggregateFunction::Count)
    }
}

/// Which descendant cards an aggregate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateScope {
    /// Every card type below the aggregate's card type in the tree.
    AllDescendants,
    /// Only cards of one descendant card type.
    CardType(CardTypeId),
}

/// Aggregate configuration of an aggregate property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDef {
    /// Tree the aggregate is configured on.
    pub tree: TreeId,
    /// Aggregation function.
    pub function: AggregateFunction,
    /// Descendant scope.
    pub scope: AggregateScope,
    /// Property whose values are aggregated (none for COUNT).
    pub target: Option<PropertyDefinitionId>,
}

/// The kind of a property definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    /// Enumerated values managed by the project admin.
    ManagedList {
        values: Vec<String>,
        #[serde(default)]
        numeric: bool,
    },
    /// Any text.
    FreeText,
    /// Any number.
    FreeNumber,
    /// Calendar date.
    Date,
    /// Team member.
    User,
    /// Reference to another card.
    CardRelationship,
    /// Derived from an expression over other properties.
    Formula(FormulaDef),
    /// Derived by aggregating descendant cards in a tree.
    Aggregate(AggregateDef),
    /// Parent link maintained by a tree configuration.
    TreeRelationship { tree: TreeId },
}

impl PropertyKind {
    /// Check if this kind produces numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PropertyKind::ManagedList { numeric: true, .. }
                | PropertyKind::FreeNumber
                | PropertyKind::Aggregate(_)
        )
    }

    /// Check if this kind holds dates.
    pub fn is_date(&self) -> bool {
        matches!(self, PropertyKind::Date)
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, PropertyKind::Formula(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, PropertyKind::Aggregate(_))
    }

    /// Get the formula configuration if this is a formula.
    pub fn as_formula(&self) -> Option<&FormulaDef> {
        match self {
            PropertyKind::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// Get the aggregate configuration if this is an aggregate.
    pub fn as_aggregate(&self) -> Option<&AggregateDef> {
        match self {
            PropertyKind::Aggregate(a) => Some(a),
            _ => None,
        }
    }

    /// Human readable kind, as shown on the property list.
    pub fn describe(&self) -> &'static str {
        match self {
            PropertyKind::ManagedList { numeric: false, .. } => "Managed text list",
            PropertyKind::ManagedList { numeric: true, .. } => "Managed number list",
            PropertyKind::FreeText => "Allow any text",
            PropertyKind::FreeNumber => "Allow any number",
            PropertyKind::Date => "Date",
            PropertyKind::User => "Team",
            PropertyKind::CardRelationship => "Card",
            PropertyKind::Formula(_) => "Formula",
            PropertyKind::Aggregate(_) => "Aggregate",
            PropertyKind::TreeRelationship { .. } => "Tree relationship",
        }
    }
}

/// A property definition.
///
/// Card-type associations are held by [`CardType::properties`]; use
/// `Schema::card_types_of` to read them from the property side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub id: PropertyDefinitionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: PropertyKind,
    /// Hidden properties are not resolvable by name lookup.
    #[serde(default)]
    pub hidden: bool,
    /// Only project admins may add values (managed lists).
    #[serde(default)]
    pub restricted: bool,
    /// Values may only be changed through transitions.
    #[serde(default)]
    pub transition_only: bool,
}

impl PropertyDefinition {
    pub fn new(id: PropertyDefinitionId, name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind,
            hidden: false,
            restricted: false,
            transition_only: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A card type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardType {
    pub id: CardTypeId,
    pub name: String,
    pub position: u32,
    #[serde(default)]
    pub color: Option<String>,
    /// Properties enabled on this card type, in display order.
    #[serde(default)]
    pub properties: Vec<PropertyDefinitionId>,
}

impl CardType {
    pub fn new(id: CardTypeId, name: impl Into<String>, position: u32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            color: None,
            properties: Vec::new(),
        }
    }

    /// Check if a property is enabled on this card type.
    pub fn has_property(&self, property: PropertyDefinitionId) -> bool {
        self.properties.contains(&property)
    }
}

/// A tree configuration: card types ordered from the root level down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub id: TreeId,
    pub name: String,
    pub levels: Vec<CardTypeId>,
}

impl TreeConfig {
    /// Check if a card type participates in this tree.
    pub fn contains(&self, card_type: CardTypeId) -> bool {
        self.levels.contains(&card_type)
    }

    /// Card types below `card_type` in this tree.
    pub fn descendant_types(&self, card_type: CardTypeId) -> Vec<CardTypeId> {
        match self.levels.iter().position(|&t| t == card_type) {
            Some(pos) => self.levels[pos + 1..].to_vec(),
            None => Vec::new(),
        }
    }
}

/// What a transition does to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum TransitionAction {
    /// Set to a fixed value (Null clears it).
    Set(Value),
    /// Prompt the user; a value must be entered.
    UserInputRequired,
    /// Prompt the user; the value may be left empty.
    UserInputOptional,
}

/// A transition, scoped to one card type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub name: String,
    pub card_type: CardTypeId,
    /// Values a card must hold for the transition to be available.
    #[serde(default)]
    pub requires: BTreeMap<PropertyDefinitionId, Value>,
    /// Changes applied when the transition runs.
    #[serde(default)]
    pub sets: BTreeMap<PropertyDefinitionId, TransitionAction>,
}

impl Transition {
    /// Check if the transition reads or writes a property.
    pub fn references(&self, property: PropertyDefinitionId) -> bool {
        self.requires.contains_key(&property) || self.sets.contains_key(&property)
    }
}

/// Comparison used in a saved view filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Is,
    IsNot,
    LessThan,
    GreaterThan,
}

/// A property filter of a saved view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub property: PropertyDefinitionId,
    pub operator: FilterOperator,
    pub value: Value,
}

/// A saved card list view, optionally promoted to a team favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardListView {
    pub id: ViewId,
    pub name: String,
    #[serde(default)]
    pub favorite: bool,
    /// Card types the view is filtered to; empty means every card type.
    #[serde(default)]
    pub card_types: BTreeSet<CardTypeId>,
    #[serde(default)]
    pub filters: Vec<ViewFilter>,
    #[serde(default)]
    pub group_by: Option<PropertyDefinitionId>,
    #[serde(default)]
    pub color_by: Option<PropertyDefinitionId>,
    #[serde(default)]
    pub columns: Vec<PropertyDefinitionId>,
}

impl CardListView {
    pub fn new(id: ViewId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            favorite: false,
            card_types: BTreeSet::new(),
            filters: Vec::new(),
            group_by: None,
            color_by: None,
            columns: Vec::new(),
        }
    }

    /// Check if the view filters, groups or colors by a property.
    pub fn filters_on(&self, property: PropertyDefinitionId) -> bool {
        self.filters.iter().any(|f| f.property == property)
            || self.group_by == Some(property)
            || self.color_by == Some(property)
    }

    /// Check if the view shows a property as a column.
    pub fn lists_column(&self, property: PropertyDefinitionId) -> bool {
        self.columns.contains(&property)
    }

    /// Check if the view mentions a property in any way.
    pub fn references(&self, property: PropertyDefinitionId) -> bool {
        self.filters_on(property) || self.lists_column(property)
    }
}

/// Values pre-filled on new cards of a card type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDefaults {
    pub card_type: CardTypeId,
    #[serde(default)]
    pub values: BTreeMap<PropertyDefinitionId, Value>,
}

impl CardDefaults {
    pub fn new(card_type: CardTypeId) -> Self {
        Self {
            card_type,
            values: BTreeMap::new(),
        }
    }

    pub fn sets(&self, property: PropertyDefinitionId) -> bool {
        self.values.contains_key(&property)
    }
}
