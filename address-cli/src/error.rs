//! Error types emitted by the address CLI.

use std::sync::Arc;

use address_data::LoadError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the address CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The resource name was configured as an empty string.
    #[error("{field} must not be empty (set --{field} or {env})")]
    EmptyArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A configured resource directory does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingResourceDir {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A configured resource directory exists but is not a directory.
    #[error("{field} path {path:?} exists but is not a directory")]
    ResourceDirNotDirectory {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A configured resource directory could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectResourceDir {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading the dataset failed.
    #[error("failed to load address dataset: {0}")]
    Load(#[from] LoadError),
    /// Serialising the inspection report failed.
    #[error("failed to serialise inspection report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the inspection report failed.
    #[error("failed to write inspection report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
