//! Scenario errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    #[error("scenario '{0}' has no project")]
    MissingProject(String),
}

impl ScenarioError {
    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
