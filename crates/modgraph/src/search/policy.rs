//! Termination policies for depth-first search.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::types::{Dependency, ModuleId};

/// Decides whether a depth-first search descends into an edge's target.
///
/// The search consults the policy once per newly discovered module, right
/// before it would descend. The target is recorded as reached (with
/// `current` as its parent) either way; returning `true` only prevents the
/// search from expanding the target's own dependencies.
///
/// Any `FnMut(&ModuleId, &Dependency) -> bool` closure is a policy.
pub trait TerminationPolicy {
    /// Returns `true` to stop at `edge.to()` instead of descending into it.
    fn should_stop(&mut self, current: &ModuleId, edge: &Dependency) -> bool;
}

impl<F> TerminationPolicy for F
where
    F: FnMut(&ModuleId, &Dependency) -> bool,
{
    fn should_stop(&mut self, current: &ModuleId, edge: &Dependency) -> bool {
        self(current, edge)
    }
}

/// Never stops; the search explores everything reachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTermination;

impl TerminationPolicy for NoTermination {
    fn should_stop(&mut self, _current: &ModuleId, _edge: &Dependency) -> bool {
        false
    }
}

/// Stops at any module in a boundary set and remembers where it stopped.
///
/// The modules stopped at form the *frontier*; each is recorded with the
/// module it was reached from.
#[derive(Debug, Clone)]
pub struct StopAtModules<'a> {
    boundary: &'a BTreeSet<ModuleId>,
    frontier: BTreeMap<ModuleId, ModuleId>,
}

impl<'a> StopAtModules<'a> {
    /// Stop at every module in `boundary`.
    #[must_use]
    pub fn new(boundary: &'a BTreeSet<ModuleId>) -> Self {
        Self {
            boundary,
            frontier: BTreeMap::new(),
        }
    }

    /// Boundary modules the search stopped at, each mapped to the module
    /// it was reached from.
    #[must_use]
    pub fn frontier(&self) -> &BTreeMap<ModuleId, ModuleId> {
        &self.frontier
    }

    /// Consume the policy, keeping only the frontier.
    #[must_use]
    pub fn into_frontier(self) -> BTreeMap<ModuleId, ModuleId> {
        self.frontier
    }
}

impl TerminationPolicy for StopAtModules<'_> {
    fn should_stop(&mut self, current: &ModuleId, edge: &Dependency) -> bool {
        let target = edge.to();
        if !self.boundary.contains(target) {
            return false;
        }
        trace!(module = %target, from = %current, "Stopping at boundary module");
        self.frontier
            .entry(target.clone())
            .or_insert_with(|| current.clone());
        true
    }
}
