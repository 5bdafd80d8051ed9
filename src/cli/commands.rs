//! Command dispatch: read input, plan, report.

use std::io::{self, Write};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::PartyService;
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{RequiredSet, TreeView};
use crate::infrastructure::{read_input, InfraError, InputReader, InputSource, RealInputReader};

/// Run the CLI against the user's settings, the real stdin/filesystem and stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, settings, &RealInputReader, &mut out)
}

fn check_args(cli: &Cli) -> CliResult<()> {
    if cli.required.iter().any(|name| name.trim().is_empty()) {
        return Err(CliError::InvalidArgs("--required needs a non-empty name".into()));
    }
    Ok(())
}

/// Run with injected settings, input and output; nothing is written to `out`
/// unless every step succeeded. `--strategy` overrides `settings.strategy`.
#[instrument(level = "debug", skip(settings, reader, out))]
pub fn run<W: Write>(
    cli: &Cli,
    mut settings: Settings,
    reader: &dyn InputReader,
    out: &mut W,
) -> CliResult<()> {
    check_args(cli)?;
    if let Some(strategy) = cli.strategy {
        settings.strategy = strategy;
    }
    debug!(?settings, "settings loaded");

    let source = InputSource::from_arg(&cli.file);
    let content = read_input(reader, &source)?;

    let required: RequiredSet = cli.required.iter().cloned().collect();
    let service = PartyService::new(settings);
    let plan = service.plan(&content, &required)?;

    if !plan.missing_required.is_empty() {
        output::warning(&format!(
            "required attendees not selected (an ancestor's choice skipped them): {}",
            plan.missing_required.iter().join(", ")
        ));
    }

    output::write_solution(out, &plan.solution)
        .map_err(|e| InfraError::io("write result", e))?;

    if cli.tree {
        eprintln!(
            "{}",
            plan.tree.to_marked_tree_string(&plan.solution, &required)
        );
    }
    Ok(())
}
