//! User-facing message texts.
//!
//! The classifier, the applier and the session all report to the same
//! audience, so the wording lives in one place.

/// Error: a project must keep at least one card type.
pub const ERR_LAST_CARD_TYPE: &str = "A project must have at least one card type";

/// Error: name is blank.
pub const ERR_NAME_BLANK: &str = "Name can't be blank";

/// Error: name contains one of the reserved characters.
pub const ERR_NAME_INVALID_CHARS: &str =
    "Name should not contain '&', '=', '#', '\"', ';', '[' and ']' characters";

/// Error: name is already used in the project.
pub fn name_taken(name: &str) -> String {
    format!("Name {} has already been taken", name)
}

/// Error: name longer than allowed.
pub fn name_too_long(max: impl std::fmt::Display) -> String {
    format!("Name is too long (maximum is {} characters)", max)
}

/// Error: name collides with a predefined property.
pub fn name_reserved(name: &str) -> String {
    format!("Name {} is a reserved property name", name)
}

/// Blocking: the property feeds an aggregate directly.
pub fn target_of_aggregate(property: &str, aggregate: &str) -> String {
    format!(
        "{} is used as the target property of {}. To manage {}, please go to configure aggregate properties page.",
        property, aggregate, aggregate
    )
}

/// Blocking: the property feeds an aggregate through a formula.
pub fn component_of_aggregate_target(property: &str, formula: &str, aggregate: &str) -> String {
    format!(
        "{} is used as a component of formula {}, which is the target property of {}. To manage {}, please go to configure aggregate properties page.",
        property, formula, aggregate, aggregate
    )
}

/// Blocking: a formula used by an aggregate would stop producing numbers.
pub fn aggregate_target_not_numeric(formula: &str, aggregate: &str) -> String {
    format!(
        "{} is used as the target property of {} and must remain numeric. To manage {}, please go to configure aggregate properties page.",
        formula, aggregate, aggregate
    )
}

/// Blocking: aggregate properties are configured on their tree.
pub fn aggregate_managed_by_tree(property: &str) -> String {
    format!(
        "{} is an aggregate property. To manage {}, please go to configure aggregate properties page.",
        property, property
    )
}

/// Blocking: tree relationship properties are configured on their tree.
pub fn managed_by_tree(property: &str, tree: &str) -> String {
    format!(
        "{} is a tree relationship property of {}. To manage {}, please go to configure tree page.",
        property, tree, property
    )
}

/// Blocking: the property cannot be deleted while a formula uses it.
pub fn component_of_formula(property: &str, formula: &str) -> String {
    format!(
        "{} is used as a component property of {}. To delete {}, please remove it from the formula of {} first.",
        property, formula, property, formula
    )
}

/// Warning: cards of a type lose their values.
pub fn cards_lose_values(count: usize, card_type: &str, property: &str) -> String {
    format!(
        "{} {} of type {} will lose their value for {}.",
        count,
        pluralize(count, "card", "cards"),
        card_type,
        property
    )
}

/// Warning: transitions are deleted.
pub fn transitions_deleted(names: &[String]) -> String {
    format!(
        "The following {} {} will be deleted: {}.",
        names.len(),
        pluralize(names.len(), "transition", "transitions"),
        names.join(", ")
    )
}

/// Warning: team favorites or saved views are deleted.
pub fn views_deleted(names: &[String], favorites: bool) -> String {
    let (one, many) = if favorites {
        ("team favorite", "team favorites")
    } else {
        ("saved view", "saved views")
    };
    format!(
        "The following {} {} will be deleted: {}.",
        names.len(),
        pluralize(names.len(), one, many),
        names.join(", ")
    )
}

/// Warning: card defaults stop setting the property.
pub fn card_defaults_cleared(card_type: &str, property: &str) -> String {
    format!(
        "Card defaults for {} will no longer set {}.",
        card_type, property
    )
}

/// Warning: a formula is no longer available on a card type.
pub fn formula_detached(formula: &str, card_type: &str, property: &str) -> String {
    format!(
        "Formula {} will no longer be available on {} because it uses {}.",
        formula, card_type, property
    )
}

/// Silent: the dependent keeps working.
pub fn not_affected(name: &str) -> String {
    format!("{} is not affected.", name)
}

/// Silent: a view stops listing the property as a column.
pub fn column_dropped(view: &str, property: &str) -> String {
    format!("{} will no longer show {} as a column.", view, property)
}

/// Silent: the property is dropped from a card type with no values.
pub fn association_removed(card_type: &str, property: &str) -> String {
    format!("{} will be removed from card type {}.", property, card_type)
}

/// Silent: a formula is re-rendered with the new name.
pub fn reference_renamed(formula: &str) -> String {
    format!("Formula {} will be updated to use the new name.", formula)
}

fn pluralize<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
