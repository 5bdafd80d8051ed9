//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

use crate::domain::Strategy;

/// Plan the best office party: pick the highest-scoring guests so that nobody attends with their direct boss
#[derive(Parser, Debug)]
#[command(name = "office-party")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the org chart ("-" reads standard input)
    #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Required to attend (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub required: Vec<String>,

    /// Solver traversal: iterative or recursive (recursive switches to iterative beyond 1024 levels)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Additional settings file (TOML)
    #[arg(short, long, env = "OFFICE_PARTY_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the org chart with the selection to stderr
    #[arg(long)]
    pub tree: bool,

    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions and exit
    #[arg(long = "completion", value_enum, value_name = "SHELL")]
    pub generator: Option<Shell>,
}
