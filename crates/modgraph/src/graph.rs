//! Adjacency-set storage for module dependency graphs.
//!
//! Modules map to the set of their outgoing [`Dependency`] edges. Both levels
//! are ordered by [`ModuleId`], so every traversal over a `Graph` visits
//! edges in the same order on every run and platform.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::types::{Dependency, ModuleId};

static NO_DEPENDENCIES: BTreeSet<Dependency> = BTreeSet::new();

/// A directed module dependency graph.
///
/// Modules that were never mentioned simply have no outgoing edges; looking
/// them up is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    modules: BTreeMap<ModuleId, BTreeSet<Dependency>>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module, even if it has no dependencies.
    pub fn add_module(&mut self, id: ModuleId) {
        self.modules.entry(id).or_default();
    }

    /// Insert `edge` into the outgoing set of `from`.
    ///
    /// An edge between the same two modules is stored once. When the same
    /// edge is declared both optional and required, the required declaration
    /// wins regardless of insertion order.
    pub fn add_dependency(&mut self, from: ModuleId, edge: Dependency) {
        let edges = self.modules.entry(from).or_default();
        let upgrade = edges
            .get(&edge)
            .map(|existing| existing.is_optional() && !edge.is_optional());
        match upgrade {
            Some(true) => {
                trace!(edge = %edge, "Upgrading optional dependency to required");
                edges.replace(edge);
            }
            Some(false) => {}
            None => {
                edges.insert(edge);
            }
        }
    }

    /// Convenience for `add_dependency(edge.from().clone(), edge)`.
    pub fn add_edge(&mut self, edge: Dependency) {
        self.add_dependency(edge.from().clone(), edge);
    }

    /// Outgoing edges of `id`; empty if the module is unknown.
    #[must_use]
    pub fn dependencies_of(&self, id: &ModuleId) -> &BTreeSet<Dependency> {
        self.modules.get(id).unwrap_or(&NO_DEPENDENCIES)
    }

    /// Returns `true` if the module was recorded, with or without edges.
    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    /// Modules that have an entry in the graph, in identifier order.
    ///
    /// Modules only ever seen as a dependency target are not included.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    /// Every edge, grouped by source module in identifier order.
    pub fn edges(&self) -> impl Iterator<Item = &Dependency> {
        self.modules.values().flatten()
    }

    /// Number of modules with an entry in the graph.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.modules.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Build a new graph with every edge inverted.
    ///
    /// Optional flags carry over. The receiver is not modified.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut reverse = Self::new();
        for (from, edges) in &self.modules {
            reverse.add_module(from.clone());
            for edge in edges {
                reverse.add_dependency(edge.to().clone(), edge.reversed());
            }
        }
        reverse
    }
}

impl FromIterator<Dependency> for Graph {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Dependency> for Graph {
    fn extend<I: IntoIterator<Item = Dependency>>(&mut self, iter: I) {
        for edge in iter {
            self.add_edge(edge);
        }
    }
}
