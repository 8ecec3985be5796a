//! Transitions, saved views and card defaults.

use crate::error::MutationResult;
use crate::Writer;
use mingle_core::{CardTypeId, PropertyDefinitionId, TransitionId, ViewId};
use mingle_graph::ProjectRepository;

pub fn delete_transition<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    id: TransitionId,
) -> MutationResult<()> {
    w.remove_transition(id);
    Ok(())
}

pub fn destroy_view<R: ProjectRepository>(w: &mut Writer<'_, R>, id: ViewId) -> MutationResult<()> {
    w.remove_view(id);
    Ok(())
}

/// Remove a column from a view, keeping the view.
pub fn drop_view_column<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    view: ViewId,
    property: PropertyDefinitionId,
) -> MutationResult<()> {
    let Some(mut updated) = w.schema().view(view).cloned() else {
        return Ok(());
    };
    if !updated.lists_column(property) {
        return Ok(());
    }
    updated.columns.retain(|&c| c != property);
    w.put_view(updated);
    Ok(())
}

/// Remove a card type from a view's card type filter.
pub fn narrow_view<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    view: ViewId,
    card_type: CardTypeId,
) -> MutationResult<()> {
    let Some(mut updated) = w.schema().view(view).cloned() else {
        return Ok(());
    };
    if !updated.card_types.remove(&card_type) {
        return Ok(());
    }
    w.put_view(updated);
    Ok(())
}

/// Remove a card type together with its card defaults.
pub fn delete_card_type<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    card_type: CardTypeId,
) -> MutationResult<()> {
    w.remove_card_defaults(card_type);
    w.remove_card_type(card_type)?;
    Ok(())
}

/// Stop a card type's defaults from setting a property.
pub fn clear_card_default<R: ProjectRepository>(
    w: &mut Writer<'_, R>,
    card_type: CardTypeId,
    property: PropertyDefinitionId,
) -> MutationResult<()> {
    let Some(mut defaults) = w.schema().card_defaults(card_type).cloned() else {
        return Ok(());
    };
    if defaults.values.remove(&property).is_none() {
        return Ok(());
    }
    if defaults.values.is_empty() {
        w.remove_card_defaults(card_type);
    } else {
        w.put_card_defaults(defaults);
    }
    Ok(())
}
