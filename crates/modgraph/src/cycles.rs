//! Circular dependency detection.
//!
//! Module graphs are expected to contain cycles (modules commonly depend on
//! each other in pairs), so this is a report, not an error.

use std::collections::HashMap;
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::graph::Graph;
use crate::types::ModuleId;

/// A set of modules that all (transitively) depend on each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    modules: Vec<ModuleId>,
}

impl Cycle {
    /// Members of the cycle, in identifier order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }

    /// Number of modules in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always `false` for cycles returned by [`find_cycles`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for module in &self.modules {
            write!(f, "{module} -> ")?;
        }
        match self.modules.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Find every strongly connected component that forms a cycle.
///
/// A component counts if it has more than one member or its only member
/// depends on itself. Cycles are sorted by their first member.
#[must_use]
pub fn find_cycles(graph: &Graph) -> Vec<Cycle> {
    let mut digraph: DiGraph<&ModuleId, ()> = DiGraph::new();
    let mut nodes: HashMap<&ModuleId, NodeIndex> = HashMap::new();

    for module in graph.modules() {
        node_for(&mut digraph, &mut nodes, module);
    }
    for edge in graph.edges() {
        let from = node_for(&mut digraph, &mut nodes, edge.from());
        let to = node_for(&mut digraph, &mut nodes, edge.to());
        digraph.add_edge(from, to, ());
    }

    let mut cycles: Vec<Cycle> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => digraph.contains_edge(*single, *single),
            members => members.len() > 1,
        })
        .map(|component| {
            let mut modules: Vec<ModuleId> = component
                .into_iter()
                .map(|index| digraph[index].clone())
                .collect();
            modules.sort();
            Cycle { modules }
        })
        .collect();
    cycles.sort_by(|a, b| a.modules.first().cmp(&b.modules.first()));

    debug!(
        modules = digraph.node_count(),
        cycles = cycles.len(),
        "Cycle detection complete"
    );
    cycles
}

fn node_for<'g>(
    digraph: &mut DiGraph<&'g ModuleId, ()>,
    nodes: &mut HashMap<&'g ModuleId, NodeIndex>,
    id: &'g ModuleId,
) -> NodeIndex {
    *nodes.entry(id).or_insert_with(|| digraph.add_node(id))
}
