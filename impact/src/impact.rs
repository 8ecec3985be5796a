//! Impact records.

use mingle_dependency::Dependency;
use serde::Serialize;

/// Severity of an impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cannot proceed until resolved elsewhere.
    Blocking,
    /// Proceeds only with explicit confirmation.
    Warning,
    /// Proceeds without comment.
    Silent,
}

/// One classified dependent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub severity: Severity,
    /// User-facing text.
    pub message: String,
    pub dependency: Dependency,
}

impl Impact {
    pub fn new(severity: Severity, message: impl Into<String>, dependency: Dependency) -> Self {
        Self {
            severity,
            message: message.into(),
            dependency,
        }
    }

    pub fn blocking(message: impl Into<String>, dependency: Dependency) -> Self {
        Self::new(Severity::Blocking, message, dependency)
    }

    pub fn warning(message: impl Into<String>, dependency: Dependency) -> Self {
        Self::new(Severity::Warning, message, dependency)
    }

    pub fn silent(message: impl Into<String>, dependency: Dependency) -> Self {
        Self::new(Severity::Silent, message, dependency)
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Blocking)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    pub fn is_silent(&self) -> bool {
        matches!(self.severity, Severity::Silent)
    }
}

/// What to do with a classified change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Proceed,
    NeedsConfirmation,
    Blocked,
}

/// Collection of impacts for one change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpactReport {
    impacts: Vec<Impact>,
    /// Silent impacts also need a confirmation.
    #[serde(skip)]
    confirm_silent: bool,
}

impl ImpactReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require confirmation for silent impacts too.
    pub fn with_silent_confirmation(mut self, confirm_silent: bool) -> Self {
        self.confirm_silent = confirm_silent;
        self
    }

    /// Add an impact.
    pub fn push(&mut self, impact: Impact) {
        self.impacts.push(impact);
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    /// Get all impacts, in dependency order.
    pub fn all(&self) -> &[Impact] {
        &self.impacts
    }

    pub fn blocking(&self) -> impl Iterator<Item = &Impact> {
        self.impacts.iter().filter(|i| i.is_blocking())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Impact> {
        self.impacts.iter().filter(|i| i.is_warning())
    }

    pub fn silent(&self) -> impl Iterator<Item = &Impact> {
        self.impacts.iter().filter(|i| i.is_silent())
    }

    pub fn has_blocking(&self) -> bool {
        self.blocking().next().is_some()
    }

    /// Messages of one severity, without duplicates, in order.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        let mut messages: Vec<String> = Vec::new();
        for impact in self.impacts.iter().filter(|i| i.severity == severity) {
            if !messages.contains(&impact.message) {
                messages.push(impact.message.clone());
            }
        }
        messages
    }

    /// Messages the user must confirm.
    pub fn confirmation_messages(&self) -> Vec<String> {
        let mut messages = self.messages(Severity::Warning);
        if self.confirm_silent {
            messages.extend(self.messages(Severity::Silent));
        }
        messages
    }

    /// Decide the outcome. Any blocking impact wins over confirmation.
    pub fn decision(&self, confirmed: bool) -> Decision {
        if self.has_blocking() {
            Decision::Blocked
        } else if !confirmed && !self.confirmation_messages().is_empty() {
            Decision::NeedsConfirmation
        } else {
            Decision::Proceed
        }
    }
}
