//! Enumeration of every simple path between two modules.
//!
//! The number of simple paths can grow exponentially with graph size, so
//! callers working on large graphs should set a limit.

use std::collections::{HashSet, btree_set};

use tracing::debug;

use crate::graph::Graph;
use crate::types::{Dependency, ModuleId};

/// Finds every simple path from `source` to `target`.
///
/// Shorthand for `AllPathsSearch::new(graph, source, target).run()`.
#[must_use]
pub fn all_paths(graph: &Graph, source: &ModuleId, target: &ModuleId) -> AllPaths {
    AllPathsSearch::new(graph, source, target).run()
}

/// A configured all-paths search.
#[derive(Debug, Clone)]
pub struct AllPathsSearch<'g> {
    graph: &'g Graph,
    source: &'g ModuleId,
    target: &'g ModuleId,
    limit: Option<usize>,
}

impl<'g> AllPathsSearch<'g> {
    /// Search `graph` for paths from `source` to `target`.
    #[must_use]
    pub fn new(graph: &'g Graph, source: &'g ModuleId, target: &'g ModuleId) -> Self {
        Self {
            graph,
            source,
            target,
            limit: None,
        }
    }

    /// Keep at most `limit` paths.
    ///
    /// The result is marked truncated only when a path beyond the limit
    /// exists.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the search.
    ///
    /// Paths are produced in the order a depth-first walk over
    /// identifier-ordered edges discovers them. A module never appears twice
    /// in one path, and the walk does not continue past `target`.
    #[must_use]
    pub fn run(&self) -> AllPaths {
        let mut result = AllPaths {
            paths: Vec::new(),
            truncated: false,
        };

        if self.source == self.target {
            if self.limit == Some(0) {
                result.truncated = true;
            } else {
                result.paths.push(vec![self.source.clone()]);
            }
            return result;
        }

        let mut path: Vec<&ModuleId> = vec![self.source];
        let mut on_path: HashSet<&ModuleId> = HashSet::from([self.source]);
        let mut stack: Vec<btree_set::Iter<'_, Dependency>> =
            vec![self.graph.dependencies_of(self.source).iter()];

        while let Some(edges) = stack.last_mut() {
            let Some(edge) = edges.next() else {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                }
                continue;
            };

            let next = edge.to();
            if on_path.contains(next) {
                continue;
            }

            if next == self.target {
                if self.limit.is_some_and(|limit| result.paths.len() >= limit) {
                    // One path past the limit proves the result is incomplete.
                    result.truncated = true;
                    break;
                }
                let mut found: Vec<ModuleId> = path.iter().map(|id| (*id).clone()).collect();
                found.push(next.clone());
                result.paths.push(found);
                continue;
            }

            path.push(next);
            on_path.insert(next);
            stack.push(self.graph.dependencies_of(next).iter());
        }

        debug!(
            source = %self.source,
            target = %self.target,
            paths = result.paths.len(),
            truncated = result.truncated,
            "All-paths search complete"
        );
        result
    }
}

/// Paths found by an [`AllPathsSearch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllPaths {
    paths: Vec<Vec<ModuleId>>,
    truncated: bool,
}

impl AllPaths {
    /// The paths, each from source to target inclusive.
    #[must_use]
    pub fn paths(&self) -> &[Vec<ModuleId>] {
        &self.paths
    }

    /// Consume the result, keeping the paths.
    #[must_use]
    pub fn into_paths(self) -> Vec<Vec<ModuleId>> {
        self.paths
    }

    /// Number of paths found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns `true` if more paths exist than the limit allowed.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The first of the shortest paths found.
    #[must_use]
    pub fn shortest(&self) -> Option<&[ModuleId]> {
        self.paths
            .iter()
            .min_by_key(|path| path.len())
            .map(Vec::as_slice)
    }
}
