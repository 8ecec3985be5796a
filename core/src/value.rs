//! Property values carried by cards.
//!
//! Cards store one value per enabled property definition. Numeric values are
//! kept as `f64` and rounded to the project precision when derived by a
//! formula; dates are calendar dates without a time component.

use crate::CardId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can be stored against a property on a card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Not set.
    #[default]
    Null,
    /// Number (managed number list, free number, formula, aggregate).
    Number(f64),
    /// Text (managed text list, free text).
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// User login.
    User(String),
    /// Reference to another card (card relationship, tree relationship).
    Card(CardId),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as number if this is a Number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as date if this is a Date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get as string reference for Text and User values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::User(s) => Some(s),
            _ => None,
        }
    }

    /// Get the referenced card if this is a Card value.
    pub fn as_card(&self) -> Option<CardId> {
        match self {
            Value::Card(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Date(_) => "Date",
            Value::User(_) => "User",
            Value::Card(_) => "Card",
        }
    }

    /// Round a numeric value to the given number of decimal places.
    /// Non-numeric values are returned unchanged.
    pub fn rounded(self, precision: u8) -> Value {
        match self {
            Value::Number(n) => Value::Number(round_to(n, precision)),
            other => other,
        }
    }
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(n: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(i32::from(precision));
    (n * factor).round() / factor
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "(not set)"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%d %b %Y")),
            Value::User(login) => write!(f, "{}", login),
            Value::Card(id) => write!(f, "#{}", id.raw()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<CardId> for Value {
    fn from(id: CardId) -> Self {
        Value::Card(id)
    }
}
