//! End-to-end tests for the CLI layer with injected input and captured output

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use office_party::cli::commands::run;
use office_party::cli::{Cli, CliError};
use office_party::config::{FieldNames, Settings};
use office_party::domain::{Strategy, MAX_RECURSION_DEPTH};
use office_party::exitcode;
use office_party::infrastructure::{InputReader, InputSource, RealInputReader};
use office_party::util::testing;

const ORG_CHART: &str = r#"[
    {"name": "A", "party-animal-score": 10, "boss": null},
    {"name": "B", "party-animal-score": 20, "boss": "A"},
    {"name": "C", "party-animal-score": 30, "boss": "B"}
]"#;

/// Serves fixed content for stdin and refuses files.
struct StdinReader(&'static str);

impl InputReader for StdinReader {
    fn read_to_string(&self, source: &InputSource) -> io::Result<String> {
        match source {
            InputSource::Stdin => Ok(self.0.to_string()),
            InputSource::File(path) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unexpected file {}", path.display()),
            )),
        }
    }
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("office-party").chain(args.iter().copied())).unwrap()
}

/// Compiled defaults only: no user config file, no environment.
fn run_with_stdin(args: &[&str], stdin: &'static str) -> (Result<(), i32>, String) {
    let cli = parse(args);
    let mut out = Vec::new();
    let result =
        run(&cli, Settings::default(), &StdinReader(stdin), &mut out).map_err(|e| e.exit_code());
    (result, String::from_utf8(out).unwrap())
}

// ============================================================
// Argument parsing
// ============================================================

#[test]
fn given_no_args_when_parsing_then_reads_stdin_with_defaults() {
    let cli = parse(&[]);

    assert_eq!(cli.file, PathBuf::from("-"));
    assert!(cli.required.is_empty());
    assert_eq!(cli.strategy, None);
    assert!(!cli.tree);
    assert_eq!(cli.debug, 0);
}

#[test]
fn given_repeated_required_when_parsing_then_collects_all() {
    let cli = parse(&["org.json", "-r", "A", "--required", "C", "-s", "recursive", "-dd"]);

    assert_eq!(cli.file, PathBuf::from("org.json"));
    assert_eq!(cli.required, vec!["A", "C"]);
    assert_eq!(cli.strategy, Some(Strategy::Recursive));
    assert_eq!(cli.debug, 2);
}

#[test]
fn given_unknown_strategy_when_parsing_then_rejected() {
    let result = Cli::try_parse_from(["office-party", "-s", "greedy"]);

    assert!(result.is_err());
}

// ============================================================
// Running
// ============================================================

#[test]
fn given_chain_on_stdin_when_running_then_prints_value_and_ids() {
    testing::init_test_setup();
    let (result, out) = run_with_stdin(&[], ORG_CHART);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "40\nA\nC\n");
}

#[test]
fn given_recursive_strategy_when_running_then_same_output() {
    let (result, out) = run_with_stdin(&["--strategy", "recursive"], ORG_CHART);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "40\nA\nC\n");
}

#[test]
fn given_required_root_of_pair_when_running_then_forces_it() {
    let content = r#"[
        {"name": "boss", "party-animal-score": 1, "boss": null},
        {"name": "dev", "party-animal-score": 9, "boss": "boss"}
    ]"#;

    let (result, out) = run_with_stdin(&["-r", "boss"], content);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "1\nboss\n");
}

#[test]
fn given_required_conflict_when_running_then_still_succeeds() {
    // B is skipped by A's choice; reported as a warning on stderr only
    let (result, out) = run_with_stdin(&["-r", "B"], ORG_CHART);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "40\nA\nC\n");
}

#[test]
fn given_tree_flag_when_running_then_stdout_is_unchanged() {
    let (result, out) = run_with_stdin(&["--tree"], ORG_CHART);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "40\nA\nC\n");
}

#[test]
fn given_unknown_required_when_running_then_usage_error_and_no_output() {
    let (result, out) = run_with_stdin(&["-r", "Z"], ORG_CHART);

    assert_eq!(result, Err(exitcode::USAGE));
    assert!(out.is_empty());
}

#[test]
fn given_empty_required_name_when_running_then_usage_error() {
    let (result, out) = run_with_stdin(&["-r", " "], ORG_CHART);

    assert_eq!(result, Err(exitcode::USAGE));
    assert!(out.is_empty());
}

#[test]
fn given_invalid_tree_when_running_then_data_error_and_no_output() {
    let content = r#"[{"name": "a", "party-animal-score": 1, "boss": "ghost"}]"#;

    let (result, out) = run_with_stdin(&[], content);

    assert_eq!(result, Err(exitcode::DATAERR));
    assert!(out.is_empty());
}

#[test]
fn given_malformed_json_when_running_then_data_error() {
    let (result, out) = run_with_stdin(&[], "not json");

    assert_eq!(result, Err(exitcode::DATAERR));
    assert!(out.is_empty());
}

#[test]
fn given_input_file_when_running_then_reads_it() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("org.json");
    fs::write(&path, ORG_CHART).unwrap();
    let cli = parse(&[path.to_str().unwrap(), "-r", "C"]);
    let mut out = Vec::new();

    // Act
    let result = run(&cli, Settings::default(), &RealInputReader, &mut out);

    // Assert
    assert!(result.is_ok());
    assert_eq!(String::from_utf8(out).unwrap(), "40\nA\nC\n");
}

#[test]
fn given_missing_input_file_when_running_then_noinput() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let cli = parse(&[path.to_str().unwrap()]);
    let mut out = Vec::new();

    let err = run(&cli, Settings::default(), &RealInputReader, &mut out).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert!(err.to_string().contains("missing.json"));
    assert!(out.is_empty());
}

#[test]
fn given_custom_field_names_when_running_then_decodes_with_them() {
    // Arrange
    let settings = Settings {
        fields: FieldNames {
            id: "id".into(),
            value: "score".into(),
            parent: "manager".into(),
        },
        ..Settings::default()
    };
    let content = r#"[
        {"id": "lead", "score": 2, "manager": null},
        {"id": "a", "score": 3, "manager": "lead"},
        {"id": "b", "score": 4, "manager": "lead"}
    ]"#;
    let mut out = Vec::new();

    // Act
    let result = run(&parse(&[]), settings, &StdinReader(content), &mut out);

    // Assert
    assert!(result.is_ok());
    assert_eq!(String::from_utf8(out).unwrap(), "7\na\nb\n");
}

#[test]
fn given_strategy_flag_when_running_then_overrides_settings() {
    let settings = Settings {
        strategy: Strategy::Recursive,
        ..Settings::default()
    };
    let cli = parse(&["-s", "iterative"]);
    let mut out = Vec::new();

    let result = run(&cli, settings, &StdinReader(ORG_CHART), &mut out);

    assert!(result.is_ok());
    assert_eq!(String::from_utf8(out).unwrap(), "40\nA\nC\n");
}

#[test]
fn given_missing_config_file_when_loading_then_config_exit_code() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Settings::load_from(None, Some(&missing)).unwrap_err();

    assert_eq!(CliError::from(err).exit_code(), exitcode::CONFIG);
}

#[test]
fn given_only_negative_scores_when_running_then_prints_positive_zero() {
    let content = r#"[
        {"name": "a", "party-animal-score": -3, "boss": null},
        {"name": "b", "party-animal-score": -1, "boss": "a"}
    ]"#;

    for strategy in ["iterative", "recursive"] {
        let (result, out) = run_with_stdin(&["-s", strategy], content);

        assert_eq!(result, Ok(()));
        assert_eq!(out, "0\n", "strategy {strategy}");
    }
}

#[test]
fn given_single_negative_node_when_running_then_prints_positive_zero() {
    let content = r#"[{"name": "a", "party-animal-score": -3, "boss": null}]"#;

    let (result, out) = run_with_stdin(&[], content);

    assert_eq!(result, Ok(()));
    assert_eq!(out, "0\n");
}

#[test]
fn given_strategy_help_when_rendering_then_mentions_depth_fallback() {
    use clap::CommandFactory;

    let cmd = Cli::command();
    let help = cmd
        .get_arguments()
        .find(|arg| arg.get_id() == "strategy")
        .and_then(|arg| arg.get_help())
        .map(|help| help.to_string())
        .unwrap_or_default();

    assert!(help.contains(&MAX_RECURSION_DEPTH.to_string()), "got: {help}");
}
