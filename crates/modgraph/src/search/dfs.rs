//! Depth-first search.

use std::collections::btree_set;

use tracing::{debug, trace};

use super::SearchTree;
use super::policy::{NoTermination, TerminationPolicy};
use crate::graph::Graph;
use crate::types::{Dependency, ModuleId};

/// Depth-first search from `root` that explores everything reachable.
#[must_use]
pub fn depth_first(graph: &Graph, root: &ModuleId) -> SearchTree {
    depth_first_with(graph, root, &mut NoTermination)
}

/// Depth-first search from `root`, consulting `policy` before descending
/// into each newly discovered module.
///
/// Edges are followed in identifier order. A module stopped at by the policy
/// is still reached and has a parent; its own dependencies are not explored
/// from there, though the module can't be rediscovered along another route
/// either.
pub fn depth_first_with<P>(graph: &Graph, root: &ModuleId, policy: &mut P) -> SearchTree
where
    P: TerminationPolicy + ?Sized,
{
    let mut tree = SearchTree::new(root.clone());
    let mut stack: Vec<(&ModuleId, btree_set::Iter<'_, Dependency>)> =
        vec![(root, graph.dependencies_of(root).iter())];
    let mut stopped = 0usize;

    while let Some((current, edges)) = stack.last_mut() {
        let current = *current;
        let Some(edge) = edges.next() else {
            stack.pop();
            continue;
        };

        if !tree.discover(current, edge) {
            continue;
        }

        let target = edge.to();
        if policy.should_stop(current, edge) {
            trace!(module = %target, "Not descending");
            stopped += 1;
            continue;
        }
        stack.push((target, graph.dependencies_of(target).iter()));
    }

    debug!(root = %root, reached = tree.len(), stopped, "Depth-first search complete");
    tree
}
