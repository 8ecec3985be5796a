//! Card value writes.

use crate::error::{MutationError, MutationResult};
use crate::Writer;
use mingle_analyzer::FormulaAnalyzer;
use mingle_core::{CardId, CardTypeId, PropertyDefinitionId, Value};
use mingle_graph::ProjectRepository;
use tracing::debug;

/// Clear a property on every card of a card type.
pub fn null_card_values<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    property: PropertyDefinitionId,
    card_type: CardTypeId,
) -> MutationResult<()> {
    let holders: Vec<CardId> = w
        .cards()
        .cards_of_type(card_type)
        .filter(|c| c.has_value(property))
        .map(|c| c.id)
        .collect();
    for card in holders {
        w.set_card_value(card, property, Value::Null)?;
    }
    Ok(())
}

/// Disable a formula on a card type and clear what it computed there.
pub fn detach_formula<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    formula: PropertyDefinitionId,
    card_type: CardTypeId,
) -> MutationResult<()> {
    w.disassociate(formula, card_type)?;
    null_card_values(w, formula, card_type)
}

/// Compute a formula on every card of the card types it is enabled on.
///
/// Returns the number of cards whose value changed.
pub fn recompute_formula<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    formula: PropertyDefinitionId,
    precision: u8,
) -> MutationResult<usize> {
    let property = w.schema().require_property(formula)?;
    let def = property
        .kind
        .as_formula()
        .ok_or_else(|| MutationError::not_a_formula(&property.name))?
        .clone();
    let card_types = w.schema().card_types_of(formula);
    let compiled =
        FormulaAnalyzer::new(w.schema()).analyze(&def.expression, Some(formula), &card_types)?;

    let results: Vec<(CardId, Value)> = card_types
        .iter()
        .flat_map(|&ct| w.cards().cards_of_type(ct))
        .map(|card| {
            let value = compiled.evaluate(&card.values, def.null_is_zero, precision);
            (card.id, value)
        })
        .collect();

    let mut changed = 0;
    for (card, value) in results {
        if w.set_card_value(card, formula, value)? {
            changed += 1;
        }
    }
    debug!(formula = %compiled.text, cards = changed, "formula recomputed");
    Ok(changed)
}
