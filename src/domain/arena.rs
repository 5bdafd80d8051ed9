//! Arena-based tree storage.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::NodeId;

/// Data payload for tree nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Unique node identifier
    pub id: NodeId,
    /// Node value, may be negative
    pub value: f64,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.value)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root.
    /// Back-link used for validation only; solving walks downward.
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree structure.
///
/// Uses a generational arena for stable node references and O(1) lookups,
/// plus an id index so callers can address nodes by their `id`.
/// Built and validated by [`TreeBuilder`](crate::domain::TreeBuilder).
#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    ids: HashMap<NodeId, Index>,
    root: Option<Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node below `parent`, or as the root when `parent` is None.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let id = data.id.clone();
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        self.ids.insert(id, node_idx);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Arena index of the node with the given id.
    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Children of `idx` in insertion order; empty for unknown indices.
    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Children of the children of `idx`, in child order.
    pub fn grandchildren(&self, idx: Index) -> impl Iterator<Item = Index> + '_ {
        self.children(idx)
            .iter()
            .flat_map(move |&child| self.children(child).iter().copied())
    }

    /// Post-order traversal (children before their parent), without recursion.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of levels; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((node_idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in self.children(node_idx) {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
