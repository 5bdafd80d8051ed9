//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary traits.

pub mod error;
pub mod input;

pub use error::{InfraError, InfraResult};
pub use input::{read_input, InputReader, InputSource, RealInputReader};
