//! Maximum-weight independent set on a rooted tree with required nodes.
//!
//! For every node N:
//!
//! - `include(N) = N.value + sum of best(G)` over the grandchildren G of N
//! - `exclude(N) = sum of best(C)` over the children C of N
//! - `best(N) = include(N)` when N is required, otherwise the larger of the
//!   two with ties going to `include`.
//!
//! Forcing is local: a required node only constrains its own decision. An
//! ancestor whose include branch jumps over a required node's level can still
//! leave it out of the final selection (see `Solution::missing_required`).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::TreeArena;
use crate::domain::entities::{NodeId, RequiredSet, Solution};
use crate::domain::error::{DomainError, TreeResult};

/// Deepest tree the recursive strategy walks; deeper trees use the iterative one.
pub const MAX_RECURSION_DEPTH: usize = 1_024;

/// Traversal used to fill the memo table. Both produce identical solutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Post-order walk with an explicit stack; safe for arbitrarily deep trees
    #[default]
    Iterative,
    /// Top-down memoized recursion; call depth grows with tree depth, so
    /// trees deeper than [`MAX_RECURSION_DEPTH`] fall back to `Iterative`
    Recursive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Iterative => write!(f, "iterative"),
            Strategy::Recursive => write!(f, "recursive"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iterative" => Ok(Strategy::Iterative),
            "recursive" => Ok(Strategy::Recursive),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'iterative' or 'recursive')"
            )),
        }
    }
}

/// Winning branch for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: f64,
    choice: Choice,
}

/// Per-invocation memo table keyed by arena index.
///
/// An index identifies exactly one node id for the lifetime of the tree.
/// The table is created by one `solve` call and dropped when it returns.
#[derive(Debug, Default)]
struct Memo {
    entries: HashMap<Index, Entry>,
}

impl Memo {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    fn value(&self, idx: Index) -> f64 {
        self.entries.get(&idx).map_or(0.0, |entry| entry.value)
    }
}

/// Computes the optimal selection for one tree.
#[derive(Debug)]
pub struct IndependentSetSolver<'a> {
    tree: &'a TreeArena,
    strategy: Strategy,
}

impl<'a> IndependentSetSolver<'a> {
    pub fn new(tree: &'a TreeArena) -> Self {
        Self {
            tree,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Solve for the given required set.
    ///
    /// Every required id must exist in the tree, otherwise
    /// [`DomainError::UnknownRequiredId`] is returned before any work starts.
    /// Required sets containing a parent/child pair are accepted; the result
    /// then reflects local forcing only.
    #[instrument(level = "debug", skip(self, required), fields(strategy = ?self.strategy, required = required.len()))]
    pub fn solve(&self, required: &RequiredSet) -> TreeResult<Solution> {
        let required = self.resolve_required(required)?;

        let Some(root) = self.tree.root() else {
            return Ok(Solution {
                value: 0.0,
                ids: Vec::new(),
            });
        };

        let mut memo = Memo::with_capacity(self.tree.len());
        match self.effective_strategy() {
            Strategy::Iterative => self.fill_iterative(&required, &mut memo),
            Strategy::Recursive => {
                self.best_recursive(root, &required, &mut memo);
            }
        }

        let solution = Solution {
            value: memo.value(root),
            ids: self.collect_ids(root, &memo),
        };
        debug!(value = solution.value, selected = solution.ids.len(), "solved");
        Ok(solution)
    }

    fn effective_strategy(&self) -> Strategy {
        match self.strategy {
            Strategy::Recursive => {
                let depth = self.tree.depth();
                if depth > MAX_RECURSION_DEPTH {
                    warn!(
                        depth,
                        limit = MAX_RECURSION_DEPTH,
                        "tree too deep for recursive strategy, using iterative"
                    );
                    Strategy::Iterative
                } else {
                    Strategy::Recursive
                }
            }
            Strategy::Iterative => Strategy::Iterative,
        }
    }

    fn resolve_required(&self, required: &RequiredSet) -> TreeResult<HashSet<Index>> {
        required
            .iter()
            .map(|id| {
                self.tree
                    .index_of(id)
                    .ok_or_else(|| DomainError::UnknownRequiredId(id.clone()))
            })
            .collect()
    }

    /// Children and grandchildren are always finished before their ancestor
    /// in post-order, so one pass fills the whole table.
    fn fill_iterative(&self, required: &HashSet<Index>, memo: &mut Memo) {
        for (idx, _) in self.tree.iter_postorder() {
            let entry = self.decide(idx, required, |child| memo.value(child));
            memo.entries.insert(idx, entry);
        }
    }

    fn best_recursive(&self, idx: Index, required: &HashSet<Index>, memo: &mut Memo) -> f64 {
        if let Some(entry) = memo.entries.get(&idx) {
            return entry.value;
        }
        for &child in self.tree.children(idx) {
            self.best_recursive(child, required, memo);
        }
        // Already memoized by the child calls above
        for grandchild in self.tree.grandchildren(idx) {
            self.best_recursive(grandchild, required, memo);
        }
        let entry = self.decide(idx, required, |node| memo.value(node));
        memo.entries.insert(idx, entry);
        entry.value
    }

    /// Local decision for one node given the best values below it.
    fn decide(&self, idx: Index, required: &HashSet<Index>, best: impl Fn(Index) -> f64) -> Entry {
        let own = self.tree.get_node(idx).map_or(0.0, |node| node.data.value);
        // Starts at +0.0: an empty f64 sum is -0.0, which prints as "-0"
        let include = own + self.tree.grandchildren(idx).map(&best).fold(0.0, add);

        if required.contains(&idx) {
            trace!(?idx, include, "required node forced into include branch");
            return Entry {
                value: include,
                choice: Choice::Include,
            };
        }

        let exclude = self
            .tree
            .children(idx)
            .iter()
            .map(|&child| best(child))
            .fold(0.0, add);
        if include >= exclude {
            Entry {
                value: include,
                choice: Choice::Include,
            }
        } else {
            Entry {
                value: exclude,
                choice: Choice::Exclude,
            }
        }
    }

    /// Assembles the id sequence of the winning branches.
    ///
    /// Include yields `[N] ++ ids(grandchildren)`, exclude yields
    /// `ids(children)`, both in child order. The explicit stack reproduces
    /// that concatenation order without recursion.
    fn collect_ids(&self, root: Index, memo: &Memo) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![root];

        while let Some(idx) = stack.pop() {
            let Some(entry) = memo.entries.get(&idx) else {
                continue;
            };
            match entry.choice {
                Choice::Include => {
                    if let Some(node) = self.tree.get_node(idx) {
                        ids.push(node.data.id.clone());
                    }
                    let grandchildren: Vec<_> = self.tree.grandchildren(idx).collect();
                    stack.extend(grandchildren.into_iter().rev());
                }
                Choice::Exclude => {
                    stack.extend(self.tree.children(idx).iter().rev().copied());
                }
            }
        }

        ids
    }
}

fn add(acc: f64, value: f64) -> f64 {
    acc + value
}

/// Solve `tree` for `required` with the default strategy.
pub fn solve(tree: &TreeArena, required: &RequiredSet) -> TreeResult<Solution> {
    IndependentSetSolver::new(tree).solve(required)
}
