//! Command-line interface for inspecting the address dataset.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod inspect;

pub use error::CliError;

use inspect::{InspectArgs, run_inspect};

const ARG_RESOURCE_DIR: &str = "resource-dir";
const ARG_RESOURCE_NAME: &str = "resource-name";
const ENV_RESOURCE_NAME: &str = "ADDRESS_CMDS_INSPECT_RESOURCE_NAME";

/// Run the address CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Inspect(args) => run_inspect(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "address",
    about = "Utilities for the bundled address point dataset",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the dataset and print its schema, queries and records as JSON.
    Inspect(InspectArgs),
}

#[cfg(test)]
mod tests;
