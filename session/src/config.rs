//! Engine configuration.

use crate::error::{SessionError, SessionResult};
use mingle_registry::NameRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places of computed formula values.
    pub precision: u8,
    /// Longest allowed property name.
    pub max_name_length: usize,
    /// Names of predefined card attributes, compared case-insensitively.
    pub reserved_names: Vec<String>,
    /// Ask for confirmation even when every impact is silent.
    pub require_confirmation_for_silent: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let rules = NameRules::default();
        Self {
            precision: 2,
            max_name_length: rules.max_length,
            reserved_names: rules.reserved,
            require_confirmation_for_silent: false,
        }
    }
}

/// Layout of a configuration file: settings live under `[engine]`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

impl EngineConfig {
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub fn with_reserved_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.reserved_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_silent_confirmation(mut self, required: bool) -> Self {
        self.require_confirmation_for_silent = required;
        self
    }

    /// Name rules for property names.
    pub fn name_rules(&self) -> NameRules {
        NameRules::new(self.max_name_length, self.reserved_names.clone())
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> SessionResult<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(SessionError::config)?;
        Ok(file.engine)
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SessionError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }
}
