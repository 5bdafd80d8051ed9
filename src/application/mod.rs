//! Application layer: services and use cases
//!
//! This layer decodes input records and orchestrates the domain.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
