//! Mingle CLI - edit property definitions of a project file.

use clap::Parser;
use mingle_cli::{execute, load_config, load_json, save_json, Cli, CliResult};
use mingle_graph::Project;
use mingle_session::Session;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let project: Project = load_json(&cli.project)?;
    let mut session = Session::with_repository(project, config);

    let output = execute(&mut session, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output.body)?);

    if cli.write && output.changed {
        save_json(&cli.project, &*session.project().lock())?;
    }
    Ok(())
}
