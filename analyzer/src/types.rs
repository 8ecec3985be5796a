//! Kinds of values a formula can compute with.

use mingle_registry::PropertyKind;
use std::fmt;

/// The kind of a formula operand or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Date,
}

impl Kind {
    /// Get the operand kind of a property, if it may appear in a formula.
    ///
    /// Formulas are excluded here; nesting is reported separately.
    pub fn of_property(kind: &PropertyKind) -> Option<Kind> {
        match kind {
            PropertyKind::ManagedList { numeric: true, .. } | PropertyKind::FreeNumber => {
                Some(Kind::Number)
            }
            PropertyKind::Date => Some(Kind::Date),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Number)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Number => write!(f, "number"),
            Kind::Date => write!(f, "date"),
        }
    }
}
