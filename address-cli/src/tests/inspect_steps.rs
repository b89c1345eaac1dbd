//! Behaviour-driven step definitions driving the inspect CLI scenarios.

use super::helpers::{ResourceDirs, TWO_ROWS, report_json};
use crate::inspect::{InspectConfig, run_inspect_with};
use crate::{ARG_RESOURCE_DIR, ARG_RESOURCE_NAME, Cli, CliError, Command};
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const RESOURCE_FILE: &str = "addresses.txt";

/// Aggregates inspect scenario state so each step takes a single world
/// argument.
struct InspectWorld {
    dirs: ResourceDirs,
    cli_args: RefCell<Vec<String>>,
    outcome: RefCell<Option<Result<Vec<u8>, CliError>>>,
}

impl InspectWorld {
    fn new() -> Self {
        Self {
            dirs: ResourceDirs::new(),
            cli_args: RefCell::new(Vec::new()),
            outcome: RefCell::new(None),
        }
    }
}

#[fixture]
fn world() -> InspectWorld {
    InspectWorld::new()
}

#[given("a resource directory holding two address rows")]
fn resource_dir_exists(#[from(world)] world: &InspectWorld) {
    world.dirs.with_resource("data", RESOURCE_FILE, TWO_ROWS);
}

#[given("I pass the resource directory and name with CLI flags")]
fn cli_provides_dir(#[from(world)] world: &InspectWorld) {
    let dir = world.dirs.root().join("data");
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_RESOURCE_DIR}"),
        dir.as_str().to_owned(),
        format!("--{ARG_RESOURCE_NAME}"),
        RESOURCE_FILE.to_owned(),
    ]);
}

#[given("I pass a resource directory that does not exist")]
fn cli_provides_missing_dir(#[from(world)] world: &InspectWorld) {
    let dir = world.dirs.root().join("absent");
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_RESOURCE_DIR}"), dir.as_str().to_owned()]);
}

#[when("I run the inspect command")]
fn run_inspect_command(#[from(world)] world: &InspectWorld) {
    let mut invocation = vec!["address".to_owned(), "inspect".to_owned()];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| match cli.command {
            Command::Inspect(args) => InspectConfig::try_from(args),
        })
        .and_then(|config| {
            config.validate_sources()?;
            let mut output = Vec::new();
            run_inspect_with(&config, &mut output)?;
            Ok(output)
        });
    world.outcome.replace(Some(outcome));
}

#[then("the report lists two records in file order")]
fn report_lists_records(#[from(world)] world: &InspectWorld) {
    let borrowed = world.outcome.borrow();
    let output = borrowed
        .as_ref()
        .expect("outcome recorded")
        .as_ref()
        .expect("expected success");
    let report = report_json(output);
    assert_eq!(report["record_count"], 2);
    assert_eq!(report["records"][0]["addressId"], "A1");
    assert_eq!(report["records"][0]["name"], "Alice");
    assert_eq!(report["records"][1]["addressId"], "A2");
}

#[then("the CLI reports that the resource directory is missing")]
fn reports_missing_dir(#[from(world)] world: &InspectWorld) {
    let borrowed = world.outcome.borrow();
    let error = borrowed
        .as_ref()
        .expect("outcome recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingResourceDir { field, path } => {
            assert_eq!(*field, ARG_RESOURCE_DIR);
            assert_eq!(path, &world.dirs.root().join("absent"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_inspect_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/inspect_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: InspectWorld) {
            let _ = world;
        }
    };
}

register_inspect_scenario!(
    inspecting_directory_via_flags,
    "inspecting a resource directory via CLI flags"
);
register_inspect_scenario!(
    rejecting_missing_directory,
    "rejecting a missing resource directory"
);
