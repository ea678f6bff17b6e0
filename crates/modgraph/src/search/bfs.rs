//! Breadth-first search.

use std::collections::VecDeque;

use tracing::debug;

use super::SearchTree;
use crate::graph::Graph;
use crate::types::ModuleId;

/// Breadth-first search from `root`.
///
/// Modules are marked when first enqueued, so every tree path is a
/// shortest path by edge count. Among equally short paths the one through
/// the lowest identifiers wins.
#[must_use]
pub fn breadth_first(graph: &Graph, root: &ModuleId) -> SearchTree {
    let mut tree = SearchTree::new(root.clone());
    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        for edge in graph.dependencies_of(current) {
            if tree.discover(current, edge) {
                queue.push_back(edge.to());
            }
        }
    }

    debug!(root = %root, reached = tree.len(), "Breadth-first search complete");
    tree
}
