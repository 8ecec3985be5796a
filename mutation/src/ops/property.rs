//! Property definition writes.

use crate::error::{MutationError, MutationResult};
use crate::Writer;
use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use mingle_graph::ProjectRepository;
use mingle_parser::parse_formula;
use mingle_registry::{naming, PropertyDefinition, PropertyKind};
use std::collections::BTreeSet;

/// Attributes to write; `None` leaves an attribute as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub card_types: Option<&'a BTreeSet<CardTypeId>>,
    /// Already validated formula text.
    pub formula: Option<&'a str>,
}

/// Insert a property definition unless one with its id exists.
pub fn create_property<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    definition: &PropertyDefinition,
) -> MutationResult<()> {
    if w.schema().property(definition.id).is_some() {
        return Ok(());
    }
    w.schema().ensure_property_name_free(&definition.name, None)?;
    w.put_property(definition.clone());
    Ok(())
}

pub fn update_attributes<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
    update: AttributeUpdate<'_>,
) -> MutationResult<()> {
    let current = w.schema().require_property(property)?.clone();
    let mut updated = current.clone();

    if let Some(name) = update.name {
        let name = naming::normalize(name);
        if name != current.name {
            w.schema().ensure_property_name_free(&name, Some(property))?;
            updated.name = name;
        }
    }
    if let Some(description) = update.description {
        updated.description = description.to_string();
    }
    if let Some(text) = update.formula {
        match &mut updated.kind {
            PropertyKind::Formula(def) => def.expression = text.to_string(),
            _ => return Err(MutationError::not_a_formula(&current.name)),
        }
    }
    if updated != current {
        w.put_property(updated);
    }

    if let Some(card_types) = update.card_types {
        let existing = w.schema().card_types_of(property);
        for &ct in existing.difference(card_types) {
            w.disassociate(property, ct)?;
        }
        for &ct in card_types.difference(&existing) {
            w.associate(property, ct)?;
        }
    }
    Ok(())
}

/// Rewrite a formula so that references to `from` read `to`.
pub fn rerender_formula<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    formula: PropertyDefinitionId,
    from: &str,
    to: &str,
) -> MutationResult<()> {
    let mut updated = w.schema().require_property(formula)?.clone();
    let PropertyKind::Formula(def) = &mut updated.kind else {
        return Err(MutationError::not_a_formula(&updated.name));
    };
    let text = parse_formula(&def.expression)?
        .map_properties(&|name: &str| {
            if naming::same_name(name, from) {
                to.to_string()
            } else {
                name.to_string()
            }
        })
        .to_string();
    if text == def.expression {
        return Ok(());
    }
    def.expression = text;
    w.put_property(updated);
    Ok(())
}

pub fn hide_property<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
) -> MutationResult<()> {
    set_hidden(w, property, true)
}

pub fn unhide_property<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
) -> MutationResult<()> {
    set_hidden(w, property, false)
}

fn set_hidden<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
    hidden: bool,
) -> MutationResult<()> {
    let mut updated = w.schema().require_property(property)?.clone();
    if updated.hidden != hidden {
        updated.hidden = hidden;
        w.put_property(updated);
    }
    Ok(())
}

/// Remove a property with its associations and every card value.
pub fn delete_property<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
) -> MutationResult<()> {
    if w.schema().property(property).is_none() {
        return Ok(());
    }
    let card_types = w.schema().card_types_of(property);
    for ct in card_types {
        w.disassociate(property, ct)?;
    }
    let holders: Vec<CardId> = w
        .cards()
        .iter()
        .filter(|c| c.has_value(property))
        .map(|c| c.id)
        .collect();
    for card in holders {
        w.set_card_value(card, property, Value::Null)?;
    }
    w.remove_property(property);
    Ok(())
}
