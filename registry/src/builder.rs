//! SchemaBuilder for constructing a project schema.

use crate::naming::NameRules;
use crate::{
    AggregateDef, AggregateFunction, AggregateScope, CardDefaults, CardListView, CardType,
    FilterOperator, FormulaDef, PropertyDefinition, PropertyKind, RegistryError, RegistryResult,
    Schema, Transition, TransitionAction, TreeConfig, ViewFilter,
};
use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, TreeId, Value, ViewId};
use std::collections::{BTreeMap, BTreeSet};

/// Builder for a project schema.
///
/// Names are validated as they are added; formula expressions are stored
/// as text and checked by the analyzer when a change is proposed.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
    rules: NameRules,
}

impl SchemaBuilder {
    /// Create a new builder with default name rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom name rules.
    pub fn with_rules(rules: NameRules) -> Self {
        Self {
            schema: Schema::new(),
            rules,
        }
    }

    /// Add a card type.
    pub fn add_card_type(&mut self, name: impl Into<String>) -> CardTypeBuilder<'_> {
        CardTypeBuilder {
            builder: self,
            name: name.into(),
            color: None,
        }
    }

    /// Add a property definition.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        kind: PropertyKind,
    ) -> PropertyBuilder<'_> {
        PropertyBuilder {
            builder: self,
            name: name.into(),
            description: String::new(),
            kind,
            card_types: Vec::new(),
            hidden: false,
            restricted: false,
            transition_only: false,
        }
    }

    /// Add a formula property.
    pub fn add_formula(
        &mut self,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> PropertyBuilder<'_> {
        self.add_property(name, PropertyKind::Formula(FormulaDef::new(expression)))
    }

    /// Add an aggregate property on the given card type of a tree.
    pub fn add_aggregate(
        &mut self,
        name: impl Into<String>,
        tree: TreeId,
        card_type: CardTypeId,
        function: AggregateFunction,
        scope: AggregateScope,
        target: Option<PropertyDefinitionId>,
    ) -> PropertyBuilder<'_> {
        self.add_property(
            name,
            PropertyKind::Aggregate(AggregateDef {
                tree,
                function,
                scope,
                target,
            }),
        )
        .on(&[card_type])
    }

    /// Add a tree configuration.
    pub fn add_tree(&mut self, name: impl Into<String>) -> TreeBuilder<'_> {
        TreeBuilder {
            builder: self,
            name: name.into(),
            levels: Vec::new(),
        }
    }

    /// Add a transition on a card type.
    pub fn add_transition(
        &mut self,
        name: impl Into<String>,
        card_type: CardTypeId,
    ) -> TransitionBuilder<'_> {
        TransitionBuilder {
            builder: self,
            name: name.into(),
            card_type,
            requires: BTreeMap::new(),
            sets: BTreeMap::new(),
        }
    }

    /// Add a saved view.
    pub fn add_view(&mut self, name: impl Into<String>) -> ViewBuilder<'_> {
        ViewBuilder {
            builder: self,
            view: CardListView::new(ViewId::new(0), name),
        }
    }

    /// Set a card default value.
    pub fn card_default(
        &mut self,
        card_type: CardTypeId,
        property: PropertyDefinitionId,
        value: impl Into<Value>,
    ) -> RegistryResult<()> {
        self.schema.require_card_type(card_type)?;
        self.schema.require_property(property)?;
        let mut defaults = self
            .schema
            .card_defaults(card_type)
            .cloned()
            .unwrap_or_else(|| CardDefaults::new(card_type));
        defaults.values.insert(property, value.into());
        self.schema.put_card_defaults(defaults);
        Ok(())
    }

    /// Build the schema. A project needs at least one card type.
    pub fn build(self) -> RegistryResult<Schema> {
        if self.schema.card_type_count() == 0 {
            return Err(RegistryError::LastCardType);
        }
        Ok(self.schema)
    }
}

/// Builder for a card type.
pub struct CardTypeBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    name: String,
    color: Option<String>,
}

impl<'a> CardTypeBuilder<'a> {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Finish building this card type.
    pub fn done(self) -> RegistryResult<CardTypeId> {
        let schema = &mut self.builder.schema;
        let name = self.builder.rules.validate_card_type(&self.name)?;
        if schema.find_card_type(&name).is_some() {
            return Err(RegistryError::NameTaken(name));
        }
        let id = schema.allocate_card_type_id();
        let position = schema.card_type_count() as u32 + 1;
        let mut card_type = CardType::new(id, name, position);
        card_type.color = self.color;
        schema.put_card_type(card_type);
        Ok(id)
    }
}

/// Builder for a property definition.
pub struct PropertyBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    name: String,
    description: String,
    kind: PropertyKind,
    card_types: Vec<CardTypeId>,
    hidden: bool,
    restricted: bool,
    transition_only: bool,
}

impl<'a> PropertyBuilder<'a> {
    /// Enable the property on these card types.
    pub fn on(mut self, card_types: &[CardTypeId]) -> Self {
        self.card_types.extend_from_slice(card_types);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    pub fn transition_only(mut self) -> Self {
        self.transition_only = true;
        self
    }

    /// Treat null components as zero (formulas only).
    pub fn null_is_zero(mut self) -> Self {
        if let PropertyKind::Formula(f) = &mut self.kind {
            f.null_is_zero = true;
        }
        self
    }

    /// Finish building this property.
    pub fn done(self) -> RegistryResult<PropertyDefinitionId> {
        let schema = &mut self.builder.schema;
        let name = schema.validate_property_name(&self.name, &self.builder.rules, None)?;
        for &ct in &self.card_types {
            schema.require_card_type(ct)?;
        }
        if let PropertyKind::Aggregate(agg) = &self.kind {
            if schema.tree(agg.tree).is_none() {
                return Err(RegistryError::UnknownTree(agg.tree));
            }
        }
        if let PropertyKind::TreeRelationship { tree } = &self.kind {
            if schema.tree(*tree).is_none() {
                return Err(RegistryError::UnknownTree(*tree));
            }
        }

        let id = schema.allocate_property_id();
        let mut def = PropertyDefinition::new(id, name, self.kind).with_description(self.description);
        def.hidden = self.hidden;
        def.restricted = self.restricted;
        def.transition_only = self.transition_only;
        schema.put_property(def);
        for ct in self.card_types {
            schema.associate(id, ct)?;
        }
        Ok(id)
    }
}

/// Builder for a tree configuration.
pub struct TreeBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    name: String,
    levels: Vec<CardTypeId>,
}

impl<'a> TreeBuilder<'a> {
    /// Append the next level (top level first).
    pub fn level(mut self, card_type: CardTypeId) -> Self {
        self.levels.push(card_type);
        self
    }

    pub fn done(self) -> RegistryResult<TreeId> {
        let schema = &mut self.builder.schema;
        let name = self.builder.rules.validate_card_type(&self.name)?;
        for &ct in &self.levels {
            schema.require_card_type(ct)?;
        }
        let id = schema.allocate_tree_id();
        schema.put_tree(TreeConfig {
            id,
            name,
            levels: self.levels,
        });
        Ok(id)
    }
}

/// Builder for a transition.
pub struct TransitionBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    name: String,
    card_type: CardTypeId,
    requires: BTreeMap<PropertyDefinitionId, Value>,
    sets: BTreeMap<PropertyDefinitionId, TransitionAction>,
}

impl<'a> TransitionBuilder<'a> {
    pub fn requires(mut self, property: PropertyDefinitionId, value: impl Into<Value>) -> Self {
        self.requires.insert(property, value.into());
        self
    }

    pub fn sets(mut self, property: PropertyDefinitionId, value: impl Into<Value>) -> Self {
        self.sets
            .insert(property, TransitionAction::Set(value.into()));
        self
    }

    pub fn prompts(mut self, property: PropertyDefinitionId, required: bool) -> Self {
        let action = if required {
            TransitionAction::UserInputRequired
        } else {
            TransitionAction::UserInputOptional
        };
        self.sets.insert(property, action);
        self
    }

    /// Finish building. Every referenced property must be enabled on the card type.
    pub fn done(self) -> RegistryResult<TransitionId> {
        let schema = &mut self.builder.schema;
        let name = self.builder.rules.validate_card_type(&self.name)?;
        schema.require_card_type(self.card_type)?;
        for &property in self.requires.keys().chain(self.sets.keys()) {
            schema.require_property(property)?;
            if !schema.is_enabled(property, self.card_type) {
                return Err(RegistryError::UnknownProperty(property));
            }
        }
        let id = schema.allocate_transition_id();
        schema.put_transition(Transition {
            id,
            name,
            card_type: self.card_type,
            requires: self.requires,
            sets: self.sets,
        });
        Ok(id)
    }
}

/// Builder for a saved view or team favorite.
pub struct ViewBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    view: CardListView,
}

impl<'a> ViewBuilder<'a> {
    /// Promote to a team favorite.
    pub fn favorite(mut self) -> Self {
        self.view.favorite = true;
        self
    }

    pub fn card_types(mut self, card_types: &[CardTypeId]) -> Self {
        self.view.card_types = card_types.iter().copied().collect::<BTreeSet<_>>();
        self
    }

    pub fn filter(
        mut self,
        property: PropertyDefinitionId,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.view.filters.push(ViewFilter {
            property,
            operator,
            value: value.into(),
        });
        self
    }

    pub fn group_by(mut self, property: PropertyDefinitionId) -> Self {
        self.view.group_by = Some(property);
        self
    }

    pub fn color_by(mut self, property: PropertyDefinitionId) -> Self {
        self.view.color_by = Some(property);
        self
    }

    pub fn column(mut self, property: PropertyDefinitionId) -> Self {
        self.view.columns.push(property);
        self
    }

    pub fn done(mut self) -> RegistryResult<ViewId> {
        let schema = &mut self.builder.schema;
        self.view.name = self.builder.rules.validate_card_type(&self.view.name)?;
        for &ct in &self.view.card_types {
            schema.require_card_type(ct)?;
        }
        let id = schema.allocate_view_id();
        self.view.id = id;
        schema.put_view(self.view);
        Ok(id)
    }
}
