//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent invalid trees or invalid solve requests.
/// All of them are raised before any DP work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("record #{index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("record '{id}' has a non-finite value: {value}")]
    NonFiniteValue { id: NodeId, value: f64 },

    #[error("duplicate id: {0}")]
    DuplicateId(NodeId),

    #[error("record '{id}' references unknown parent '{parent}'")]
    UnknownParentReference { id: NodeId, parent: NodeId },

    #[error("no root found: every record has a parent")]
    NoRootFound,

    #[error("multiple roots found: {}", .0.join(", "))]
    MultipleRootsFound(Vec<NodeId>),

    #[error("cycle detected in hierarchy: '{0}' is not reachable from the root")]
    CycleDetected(NodeId),

    #[error("unknown required id: {0}")]
    UnknownRequiredId(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
