//! Inspect command implementation for the address CLI.

use std::io::{self, Write};

use address_core::{AddressFeature, Dataset, QuerySpec, Schema};
use address_data::{AddressLoader, CHINA_POI_RESOURCE, ResourceLocator};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_RESOURCE_DIR, ARG_RESOURCE_NAME, CliError, ENV_RESOURCE_NAME};

/// CLI arguments for the `inspect` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the address dataset and print its schema, replay \
                 queries and matching records as JSON. Without a resource \
                 directory the copy compiled into the binary is used.",
    about = "Print the address dataset as JSON"
)]
#[ortho_config(prefix = "ADDRESS")]
pub(crate) struct InspectArgs {
    /// Directory to search for the resource; repeat to search several in order.
    #[arg(long = ARG_RESOURCE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) resource_dir: Vec<Utf8PathBuf>,
    /// Resource file name (defaults to `chinapoi.txt`).
    #[arg(long = ARG_RESOURCE_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) resource_name: Option<String>,
}

impl InspectArgs {
    pub(crate) fn into_config(self) -> Result<InspectConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InspectConfig::try_from(merged)
    }
}

/// Resolved `inspect` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InspectConfig {
    /// Directories searched in order; empty selects the bundled data.
    pub(crate) resource_dirs: Vec<Utf8PathBuf>,
    /// Logical resource name.
    pub(crate) resource_name: String,
}

impl InspectConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        self.resource_dirs
            .iter()
            .try_for_each(|dir| Self::require_dir(dir, ARG_RESOURCE_DIR))
    }

    fn require_dir(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match dir_is_dir(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::ResourceDirNotDirectory {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingResourceDir {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectResourceDir {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<InspectArgs> for InspectConfig {
    type Error = CliError;

    fn try_from(args: InspectArgs) -> Result<Self, Self::Error> {
        let resource_name = args
            .resource_name
            .unwrap_or_else(|| CHINA_POI_RESOURCE.to_owned());
        if resource_name.trim().is_empty() {
            return Err(CliError::EmptyArgument {
                field: ARG_RESOURCE_NAME,
                env: ENV_RESOURCE_NAME,
            });
        }
        Ok(Self {
            resource_dirs: args.resource_dir,
            resource_name,
        })
    }
}

/// Return whether `path` names an existing directory.
fn dir_is_dir(path: &Utf8Path) -> io::Result<bool> {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return fs_utf8::Dir::open_ambient_dir(path, ambient_authority()).map(|_| true);
    };
    let parent = if parent.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        parent
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_dir())
}

/// JSON document printed by `inspect`.
#[derive(Debug, Serialize)]
pub(crate) struct InspectReport<'a> {
    pub(crate) type_name: &'a str,
    pub(crate) schema: &'a Schema,
    pub(crate) queries: &'a [QuerySpec],
    pub(crate) record_count: usize,
    pub(crate) records: Vec<&'a AddressFeature>,
}

impl<'a> InspectReport<'a> {
    /// Replay every query of `dataset` and keep the records that match both
    /// the query and the subset filter.
    pub(crate) fn build<D>(dataset: &'a D) -> Result<Self, D::Error>
    where
        D: Dataset,
    {
        let features = dataset.features()?;
        let queries = dataset.queries();
        let subset = dataset.subset_filter();
        let records: Vec<_> = queries
            .iter()
            .filter(|query| query.type_name() == dataset.type_name())
            .flat_map(|query| features.iter().filter(move |f| query.matches(f)))
            .filter(|f| subset.matches(f))
            .collect();
        Ok(Self {
            type_name: dataset.type_name(),
            schema: dataset.schema(),
            queries,
            record_count: features.len(),
            records,
        })
    }
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let config = resolve_inspect_config(args)?;
    let mut stdout = io::stdout().lock();
    run_inspect_with(&config, &mut stdout)
}

pub(crate) fn run_inspect_with(
    config: &InspectConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    if config.resource_dirs.is_empty() {
        let loader = AddressLoader::bundled().with_resource_name(&config.resource_name);
        write_report(&loader, writer)
    } else {
        let loader = AddressLoader::from_dirs(config.resource_dirs.iter().cloned())
            .with_resource_name(&config.resource_name);
        write_report(&loader, writer)
    }
}

fn resolve_inspect_config(args: InspectArgs) -> Result<InspectConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_report<L: ResourceLocator>(
    loader: &AddressLoader<L>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = InspectReport::build(loader).map_err(CliError::Load)?;
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<InspectConfig, CliError> {
    let merged = InspectArgs::merge_from_layers(layers).map_err(CliError::from)?;
    InspectConfig::try_from(merged)
}
