//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mingle",
    version,
    about = "Edit Mingle property definitions and card types with dependency checks"
)]
pub struct Cli {
    /// Project file (JSON)
    #[arg(short, long)]
    pub project: PathBuf,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save the project back when the command changed it
    #[arg(short, long)]
    pub write: bool,

    /// Log engine decisions at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply a change request read from a JSON file
    Change {
        #[arg(short, long)]
        request: PathBuf,
    },

    /// Show what a change request would affect, without applying it
    Preview {
        #[arg(short, long)]
        request: PathBuf,
    },

    /// Hide a property definition
    Hide {
        id: u64,
        #[arg(long)]
        confirm: bool,
    },

    /// Make a hidden property definition visible again
    Unhide { id: u64 },

    /// Delete a property definition
    Delete {
        id: u64,
        #[arg(long)]
        confirm: bool,
    },

    /// Create a property definition read from a JSON file
    CreateProperty {
        #[arg(short, long)]
        definition: PathBuf,
    },

    /// Create a card type
    CreateCardType { name: String },

    /// Delete a card type that has no cards
    DeleteCardType { id: u64 },
}
