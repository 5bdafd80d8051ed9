//! Domain entities: core data structures

use std::collections::BTreeSet;
use std::fmt;

/// Opaque, unique node identifier (an employee name in the party domain).
pub type NodeId = String;

/// Parent reference of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    /// The record is the root of the hierarchy.
    Root,
    /// The record reports to the node with this id.
    Node(NodeId),
}

/// A flat input record, before validation.
///
/// Fields are optional so that missing data can be reported by the
/// [`TreeBuilder`](crate::domain::TreeBuilder) instead of being defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: Option<NodeId>,
    pub value: Option<f64>,
    pub parent: Option<Parent>,
}

impl NodeRecord {
    /// Creates a root record.
    pub fn new(id: impl Into<NodeId>, value: f64) -> Self {
        Self {
            id: Some(id.into()),
            value: Some(value),
            parent: Some(Parent::Root),
        }
    }

    /// Creates a record with no fields set.
    pub fn empty() -> Self {
        Self {
            id: None,
            value: None,
            parent: None,
        }
    }

    /// Sets the parent of this record.
    pub fn reports_to(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(Parent::Node(parent.into()));
        self
    }
}

/// Ids that must be selected.
///
/// Ordered so that validation reports the same offending id on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet(BTreeSet<NodeId>);

impl RequiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }
}

impl<S: Into<NodeId>> FromIterator<S> for RequiredSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Optimal selection for a tree: total value and selected ids.
///
/// Ids are in traversal order (child order as built), not sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub value: f64,
    pub ids: Vec<NodeId>,
}

impl Solution {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    /// Required ids that did not make it into the selection.
    ///
    /// Forcing is local to each required node, so an ancestor that is
    /// selected can skip over a required grandchild's parent chain.
    pub fn missing_required<'a>(&self, required: &'a RequiredSet) -> Vec<&'a NodeId> {
        required.iter().filter(|id| !self.contains(id)).collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.ids.join(", "))
    }
}
