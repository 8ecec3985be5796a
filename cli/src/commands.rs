//! Command execution.

use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_graph::Project;
use mingle_session::{ChangeRequest, ChangeResponse, EngineConfig, NewProperty, Session};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::cli::Command;
use crate::error::{CliError, CliResult};

/// What a command printed, and whether it changed the project.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub body: Value,
    pub changed: bool,
}

impl Output {
    fn response(response: ChangeResponse) -> CliResult<Self> {
        Ok(Self {
            changed: response.is_applied(),
            body: serde_json::to_value(response)?,
        })
    }
}

/// Read a JSON document from disk.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a JSON document to disk.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

/// Run one command against a session.
pub fn execute(session: &mut Session<Project>, command: Command) -> CliResult<Output> {
    debug!(?command, "executing");
    match command {
        Command::Change { request } => {
            let request: ChangeRequest = load_json(&request)?;
            Output::response(session.handle_change(&request))
        }
        Command::Preview { request } => preview(session, &load_json(&request)?),
        Command::Hide { id, confirm } => {
            Output::response(session.hide_property(PropertyDefinitionId::new(id), confirm))
        }
        Command::Unhide { id } => {
            Output::response(session.unhide_property(PropertyDefinitionId::new(id)))
        }
        Command::Delete { id, confirm } => {
            Output::response(session.delete_property(PropertyDefinitionId::new(id), confirm))
        }
        Command::CreateProperty { definition } => {
            let new: NewProperty = load_json(&definition)?;
            let id = session.create_property(new)?;
            Ok(Output {
                body: json!({ "status": "created", "property_definition_id": id }),
                changed: true,
            })
        }
        Command::CreateCardType { name } => {
            let id = session.create_card_type(&name)?;
            Ok(Output {
                body: json!({ "status": "created", "card_type_id": id }),
                changed: true,
            })
        }
        Command::DeleteCardType { id } => {
            session.delete_card_type(CardTypeId::new(id))?;
            Ok(Output {
                body: json!({ "status": "deleted" }),
                changed: true,
            })
        }
    }
}

/// Classify a change request and print the report.
pub fn preview(session: &Session<Project>, request: &ChangeRequest) -> CliResult<Output> {
    let report = session.preview(&request.to_proposal())?;
    Ok(Output {
        body: json!({
            "decision": report.decision(request.confirm),
            "impacts": report.all(),
        }),
        changed: false,
    })
}
