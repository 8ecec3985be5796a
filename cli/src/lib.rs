//! Mingle command line interface.
//!
//! Loads a project from JSON, runs one command through a session and
//! prints the outcome as JSON.

pub mod cli;
mod commands;
mod error;

pub use cli::{Cli, Command};
pub use commands::{execute, load_config, load_json, preview, save_json, Output};
pub use error::{CliError, CliResult};
