//! Path searches over a module [`Graph`](crate::Graph).
//!
//! This module provides:
//! - Depth-first search with a pluggable [`TerminationPolicy`]
//! - Breadth-first search (shortest paths by edge count)
//! - Enumeration of every simple path between two modules
//!
//! ## Design
//!
//! - Single-source searches produce a [`SearchTree`]: every module reached
//!   plus the parent that discovered it
//! - Each module is discovered at most once, so it has at most one parent
//! - Traversals run on explicit work stacks and queues; depth is bounded by
//!   memory, not by the call stack
//! - Edges are visited in identifier order, so results are reproducible

mod all_paths;
mod bfs;
mod dfs;
mod policy;

pub use all_paths::{AllPaths, AllPathsSearch, all_paths};
pub use bfs::breadth_first;
pub use dfs::{depth_first, depth_first_with};
pub use policy::{NoTermination, StopAtModules, TerminationPolicy};

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Dependency, ModuleId};

/// The result of a single-source search: the reached modules and the
/// spanning tree that reached them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    root: ModuleId,
    /// Reached module -> module that discovered it (`None` for the root).
    parents: BTreeMap<ModuleId, Option<ModuleId>>,
    /// The edges along which modules were discovered.
    tree_edges: BTreeSet<Dependency>,
}

impl SearchTree {
    pub(crate) fn new(root: ModuleId) -> Self {
        let mut parents = BTreeMap::new();
        parents.insert(root.clone(), None);
        Self {
            root,
            parents,
            tree_edges: BTreeSet::new(),
        }
    }

    /// Record that `edge` was followed from `parent`.
    ///
    /// Returns `false` without changing anything if the target had already
    /// been discovered.
    pub(crate) fn discover(&mut self, parent: &ModuleId, edge: &Dependency) -> bool {
        let target = edge.to();
        if self.parents.contains_key(target) {
            return false;
        }
        self.parents.insert(target.clone(), Some(parent.clone()));
        self.tree_edges.insert(Dependency::new(
            parent.clone(),
            target.clone(),
            edge.is_optional(),
        ));
        true
    }

    /// The module the search started from.
    #[must_use]
    pub fn root(&self) -> &ModuleId {
        &self.root
    }

    /// Returns `true` if the search reached `id`.
    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.parents.contains_key(id)
    }

    /// Reached modules, root included, in identifier order.
    pub fn reached(&self) -> impl Iterator<Item = &ModuleId> {
        self.parents.keys()
    }

    /// Owned copy of the reached set, root included.
    #[must_use]
    pub fn reachable(&self) -> BTreeSet<ModuleId> {
        self.parents.keys().cloned().collect()
    }

    /// Number of reached modules, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Always `false`: the root is reached by definition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// The module that discovered `id`, or `None` for the root and for
    /// modules that were not reached.
    #[must_use]
    pub fn parent_of(&self, id: &ModuleId) -> Option<&ModuleId> {
        self.parents.get(id).and_then(Option::as_ref)
    }

    /// The edges along which modules were discovered, with their optional
    /// flags.
    #[must_use]
    pub fn tree_edges(&self) -> &BTreeSet<Dependency> {
        &self.tree_edges
    }

    /// The tree path from the root to `id`, root first.
    ///
    /// Empty if `id` was not reached; `[root]` for the root itself.
    #[must_use]
    pub fn path_to(&self, id: &ModuleId) -> Vec<ModuleId> {
        if !self.parents.contains_key(id) {
            return Vec::new();
        }

        let mut path = vec![id.clone()];
        let mut current = id;
        while let Some(Some(parent)) = self.parents.get(current) {
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();
        path
    }
}
