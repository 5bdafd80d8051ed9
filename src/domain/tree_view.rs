//! Render a tree as text with `termtree`.

use std::collections::HashSet;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;
use crate::domain::entities::{RequiredSet, Solution};

/// Conversion into a printable `termtree::Tree`.
pub trait TreeView {
    /// Plain hierarchy: `id (value)` per node.
    fn to_tree_string(&self) -> Tree<String>;

    /// Hierarchy with markers: `*` selected, `!` required.
    fn to_marked_tree_string(&self, solution: &Solution, required: &RequiredSet) -> Tree<String>;
}

impl TreeView for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        render(self, |_| String::new())
    }

    fn to_marked_tree_string(&self, solution: &Solution, required: &RequiredSet) -> Tree<String> {
        let selected: HashSet<&str> = solution.ids.iter().map(String::as_str).collect();
        render(self, |id| {
            let mut marks = String::new();
            if selected.contains(id) {
                marks.push('*');
            }
            if required.contains(id) {
                marks.push('!');
            }
            if marks.is_empty() {
                marks
            } else {
                format!(" {marks}")
            }
        })
    }
}

/// Builds the tree bottom-up from a post-order walk, so no recursion is needed.
fn render(arena: &TreeArena, marks: impl Fn(&str) -> String) -> Tree<String> {
    let Some(root) = arena.root() else {
        return Tree::new("Empty tree".to_string());
    };

    let mut done: Vec<(Index, Tree<String>)> = Vec::new();
    for (idx, node) in arena.iter_postorder() {
        let label = format!("{}{}", node.data, marks(&node.data.id));
        // Children were rendered right before their parent, in child order
        let leaves = done.split_off(done.len() - node.children.len());
        let leaves = leaves.into_iter().map(|(_, tree)| tree);
        done.push((idx, Tree::new(label).with_leaves(leaves)));
    }

    match done.pop() {
        Some((idx, tree)) if idx == root => tree,
        _ => Tree::new("Empty tree".to_string()),
    }
}
