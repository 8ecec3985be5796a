//! Step implementations.
//!
//! Each operation writes through a [`Writer`](crate::Writer) and checks the
//! current state first, so running it again writes nothing.

mod artifacts;
mod cards;
mod property;

pub use artifacts::{
    clear_card_default, delete_card_type, delete_transition, destroy_view, drop_view_column,
    narrow_view,
};
pub use cards::{detach_formula, null_card_values, recompute_formula};
pub use property::{
    create_property, delete_property, hide_property, rerender_formula, unhide_property,
    update_attributes, AttributeUpdate,
};
