//! Application services

pub mod party;

pub use party::{PartyPlan, PartyService};
