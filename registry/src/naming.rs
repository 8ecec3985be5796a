//! Name rules shared by property definitions and card types.

use crate::{RegistryError, RegistryResult};
use regex_lite::Regex;
use std::sync::OnceLock;

const DEFAULT_MAX_LENGTH: usize = 40;

fn invalid_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r#"[&=#";\[\]]"#).expect("static pattern"))
}

/// Rules a property or card type name must satisfy.
#[derive(Debug, Clone)]
pub struct NameRules {
    pub max_length: usize,
    /// Lower-cased names of predefined card attributes.
    pub reserved: Vec<String>,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            reserved: ["name", "number", "type", "project", "created by", "modified by"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl NameRules {
    pub fn new(max_length: usize, reserved: Vec<String>) -> Self {
        Self {
            max_length,
            reserved: reserved.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Validate a raw name and return it trimmed, with inner whitespace collapsed.
    ///
    /// Uniqueness is checked by the schema, not here.
    pub fn validate(&self, raw: &str) -> RegistryResult<String> {
        let name = normalize(raw);
        if name.is_empty() {
            return Err(RegistryError::NameBlank);
        }
        if invalid_chars().is_match(&name) {
            return Err(RegistryError::NameInvalidChars(name));
        }
        if name.chars().count() > self.max_length {
            return Err(RegistryError::name_too_long(name, self.max_length));
        }
        if self.reserved.iter().any(|r| r == &name.to_lowercase()) {
            return Err(RegistryError::NameReserved(name));
        }
        Ok(name)
    }

    /// Card type names only need to be present and free of reserved characters.
    pub fn validate_card_type(&self, raw: &str) -> RegistryResult<String> {
        let name = normalize(raw);
        if name.is_empty() {
            return Err(RegistryError::NameBlank);
        }
        if invalid_chars().is_match(&name) {
            return Err(RegistryError::NameInvalidChars(name));
        }
        Ok(name)
    }
}

/// Trim and collapse runs of whitespace to a single space.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive name comparison used for every lookup.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
