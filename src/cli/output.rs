//! Terminal output: result reporting and colored diagnostics
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

use crate::domain::Solution;

/// Write the result: total value, then one selected id per line.
///
/// Ids keep the order stored in the solution. Never colored.
pub fn write_solution<W: Write>(out: &mut W, solution: &Solution) -> io::Result<()> {
    writeln!(out, "{}", solution.value)?;
    for id in &solution.ids {
        writeln!(out, "{}", id)?;
    }
    out.flush()
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}
