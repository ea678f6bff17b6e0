//! Subsystem reachability analysis.
//!
//! Answers, for a server entry module and a set of subsystems:
//! - which subsystems the entry module can't reach at all
//! - how each reachable subsystem is reached
//! - which modules the entry needs without going through any subsystem
//!   (the *core*)
//! - which subsystems the core reaches directly
//! - which modules each subsystem pulls in beyond the core

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::graph::Graph;
use crate::search::{StopAtModules, depth_first, depth_first_with};
use crate::types::{Dependency, ModuleId};

/// Result of [`SubsystemReport::analyze`]. All collections are in
/// identifier order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemReport {
    /// The module the analysis started from.
    pub entry: ModuleId,
    /// Subsystems not reachable from the entry module.
    pub unreachable: BTreeSet<ModuleId>,
    /// Reachable subsystems with a path from the entry module.
    pub reachable: BTreeMap<ModuleId, Vec<ModuleId>>,
    /// Modules reachable from the entry without passing through a
    /// subsystem. Includes the entry module itself.
    pub core_modules: BTreeSet<ModuleId>,
    /// Subsystems reached straight from the core, with the path that
    /// reached them.
    pub direct_subsystems: BTreeMap<ModuleId, Vec<ModuleId>>,
    /// For every subsystem, the modules it reaches outside the core.
    ///
    /// Each set contains the subsystem itself. Other subsystems appear
    /// where they are reached but are not expanded.
    pub exclusive_modules: BTreeMap<ModuleId, BTreeSet<ModuleId>>,
}

impl SubsystemReport {
    /// Run the analysis over `graph`.
    #[must_use]
    pub fn analyze(graph: &Graph, subsystems: &BTreeSet<ModuleId>, entry: &ModuleId) -> Self {
        let everything = depth_first(graph, entry);
        let (reachable, unreachable): (Vec<_>, Vec<_>) = subsystems
            .iter()
            .partition(|subsystem| everything.contains(subsystem));
        let reachable: BTreeMap<ModuleId, Vec<ModuleId>> = reachable
            .into_iter()
            .map(|subsystem| (subsystem.clone(), everything.path_to(subsystem)))
            .collect();
        let unreachable: BTreeSet<ModuleId> = unreachable.into_iter().cloned().collect();

        let mut boundary = StopAtModules::new(subsystems);
        let core_tree = depth_first_with(graph, entry, &mut boundary);
        let frontier = boundary.into_frontier();
        let core_modules: BTreeSet<ModuleId> = core_tree
            .reached()
            .filter(|module| !frontier.contains_key(*module))
            .cloned()
            .collect();
        let direct_subsystems: BTreeMap<ModuleId, Vec<ModuleId>> = frontier
            .keys()
            .map(|subsystem| (subsystem.clone(), core_tree.path_to(subsystem)))
            .collect();

        let exclusive_modules = subsystems
            .iter()
            .map(|subsystem| {
                let modules = exclusive_to(graph, subsystems, subsystem, entry, &core_modules);
                (subsystem.clone(), modules)
            })
            .collect();

        debug!(
            entry = %entry,
            subsystems = subsystems.len(),
            unreachable = unreachable.len(),
            core = core_modules.len(),
            direct = direct_subsystems.len(),
            "Subsystem analysis complete"
        );

        Self {
            entry: entry.clone(),
            unreachable,
            reachable,
            core_modules,
            direct_subsystems,
            exclusive_modules,
        }
    }
}

/// Modules reached from `subsystem` without entering the core or expanding
/// other subsystems.
fn exclusive_to(
    graph: &Graph,
    subsystems: &BTreeSet<ModuleId>,
    subsystem: &ModuleId,
    entry: &ModuleId,
    core: &BTreeSet<ModuleId>,
) -> BTreeSet<ModuleId> {
    let mut excluded = BTreeSet::new();
    let mut policy = |_: &ModuleId, edge: &Dependency| {
        let target = edge.to();
        if target == entry || core.contains(target) {
            excluded.insert(target.clone());
            return true;
        }
        target != subsystem && subsystems.contains(target)
    };
    let tree = depth_first_with(graph, subsystem, &mut policy);

    tree.reached()
        .filter(|module| !excluded.contains(*module))
        .cloned()
        .collect()
}
