//! office-party: plan the highest-scoring office party.
//!
//! Given an org chart where every employee has a score and a boss, pick the
//! set of guests with the largest total score such that nobody attends
//! together with their direct boss. Callers may name guests who must attend;
//! that requirement is enforced at each guest's own decision only.
//!
//! Layers, innermost first:
//! - [`domain`]: tree model, validation, the solver
//! - [`application`]: record decoding and planning service
//! - [`infrastructure`]: input reading
//! - [`cli`]: argument parsing, dispatch, output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
