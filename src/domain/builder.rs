//! Tree builder: validates flat records and links them into a rooted tree.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::{NodeId, NodeRecord, Parent};
use crate::domain::error::{DomainError, TreeResult};

/// A record whose fields have all been checked for presence.
struct Checked<'a> {
    id: &'a NodeId,
    value: f64,
    parent: Option<&'a NodeId>,
}

/// Constructs a validated [`TreeArena`] from flat records.
///
/// Either the whole tree is built or an error is returned; there is no
/// partially built result.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Parent id -> positions of its children, in input order
    relationship_cache: HashMap<NodeId, Vec<usize>>,
    visited: HashSet<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from records.
    ///
    /// Checks, in order: missing fields, non-finite values, duplicate ids
    /// (first offending record wins), unknown parents, root count, and
    /// reachability from the root.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&mut self, records: &[NodeRecord]) -> TreeResult<TreeArena> {
        // Reset state for a fresh build
        self.relationship_cache.clear();
        self.visited.clear();

        let checked = Self::check_records(records)?;
        let positions = Self::index_ids(&checked)?;

        let mut roots = Vec::new();
        for (pos, record) in checked.iter().enumerate() {
            match record.parent {
                None => roots.push(pos),
                Some(parent) => {
                    if !positions.contains_key(parent.as_str()) {
                        return Err(DomainError::UnknownParentReference {
                            id: record.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                    self.relationship_cache
                        .entry(parent.clone())
                        .or_default()
                        .push(pos);
                }
            }
        }

        let root = match roots.as_slice() {
            [] => return Err(DomainError::NoRootFound),
            [root] => *root,
            _ => {
                return Err(DomainError::MultipleRootsFound(
                    roots.iter().map(|&pos| checked[pos].id.clone()).collect(),
                ))
            }
        };

        let tree = self.build_tree(&checked, root)?;

        // Nodes the walk never reached hang off a parent cycle
        if let Some(pos) = (0..checked.len()).find(|pos| !self.visited.contains(pos)) {
            return Err(DomainError::CycleDetected(checked[pos].id.clone()));
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "tree built");
        Ok(tree)
    }

    fn check_records(records: &[NodeRecord]) -> TreeResult<Vec<Checked<'_>>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| Self::check_record(index, record))
            .collect()
    }

    fn check_record(index: usize, record: &NodeRecord) -> TreeResult<Checked<'_>> {
        let missing = |field| DomainError::MissingField { index, field };
        let id = record.id.as_ref().ok_or_else(|| missing("id"))?;
        let value = record.value.ok_or_else(|| missing("value"))?;
        let parent = record.parent.as_ref().ok_or_else(|| missing("parent"))?;

        if !value.is_finite() {
            return Err(DomainError::NonFiniteValue {
                id: id.clone(),
                value,
            });
        }

        Ok(Checked {
            id,
            value,
            parent: match parent {
                Parent::Root => None,
                Parent::Node(parent) => Some(parent),
            },
        })
    }

    fn index_ids<'a>(checked: &[Checked<'a>]) -> TreeResult<HashMap<&'a str, usize>> {
        let mut positions = HashMap::with_capacity(checked.len());
        for (pos, record) in checked.iter().enumerate() {
            if positions.insert(record.id.as_str(), pos).is_some() {
                return Err(DomainError::DuplicateId(record.id.clone()));
            }
        }
        Ok(positions)
    }

    /// Breadth-first insertion from the root so every parent exists before
    /// its children and sibling order follows input order.
    fn build_tree(&mut self, checked: &[Checked<'_>], root: usize) -> TreeResult<TreeArena> {
        let mut tree = TreeArena::new();
        let mut queue = VecDeque::from([(root, None)]);

        while let Some((pos, parent_idx)) = queue.pop_front() {
            let record = &checked[pos];
            if !self.visited.insert(pos) {
                return Err(DomainError::CycleDetected(record.id.clone()));
            }

            let node_data = NodeData {
                id: record.id.clone(),
                value: record.value,
            };
            let current_idx = tree.insert_node(node_data, parent_idx);

            if let Some(children) = self.relationship_cache.get(record.id.as_str()) {
                for &child in children {
                    queue.push_back((child, Some(current_idx)));
                }
            }
        }

        Ok(tree)
    }
}
