//! Domain layer: tree model, validation and the independent-set solver
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod solver;
pub mod tree_view;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{DomainError, TreeResult};
pub use solver::{solve, IndependentSetSolver, Strategy, MAX_RECURSION_DEPTH};
pub use tree_view::TreeView;
