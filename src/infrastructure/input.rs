//! Input boundary: where the JSON records come from.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::infrastructure::{InfraError, InfraResult};

/// Input location: a file or standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` selects standard input, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Input reading abstraction for testability.
pub trait InputReader: Send + Sync {
    fn read_to_string(&self, source: &InputSource) -> io::Result<String>;
}

/// Reads from the real filesystem and process stdin.
pub struct RealInputReader;

impl InputReader for RealInputReader {
    fn read_to_string(&self, source: &InputSource) -> io::Result<String> {
        match source {
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            InputSource::File(path) => std::fs::read_to_string(path),
        }
    }
}

/// Read the whole input, attaching the source to I/O errors.
#[instrument(level = "debug", skip(reader))]
pub fn read_input(reader: &dyn InputReader, source: &InputSource) -> InfraResult<String> {
    let content = reader
        .read_to_string(source)
        .map_err(|e| InfraError::io(format!("read {source}"), e))?;
    debug!(bytes = content.len(), "input read");
    Ok(content)
}
