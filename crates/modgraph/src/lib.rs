//! # modgraph: Module Dependency Graph Analysis
//!
//! modgraph loads a modular server's module descriptors into a directed
//! dependency graph and answers questions about it: what a module pulls in,
//! how one module reaches another, which subsystems sit behind which
//! modules, and where the cycles are.
//!
//! ## Design Philosophy
//!
//! - **Snapshot, then query** - graphs are loaded completely before any search runs
//! - **Deterministic** - edges are visited in identifier order; the same graph gives the same answers
//! - **Missing is empty** - unknown modules have no edges and unreachable targets have empty paths
//! - **Policies at the edges** - what counts as a subsystem is supplied from outside, never built in
//!
//! ## Quick Start
//!
//! ```
//! use modgraph::{Dependency, Graph, ModuleId, breadth_first, depth_first};
//!
//! let a = ModuleId::main("a");
//! let (b, c, d) = (ModuleId::main("b"), ModuleId::main("c"), ModuleId::main("d"));
//!
//! let graph: Graph = [
//!     Dependency::required(a.clone(), b.clone()),
//!     Dependency::required(a.clone(), c.clone()),
//!     Dependency::required(c.clone(), d.clone()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let tree = depth_first(&graph, &a);
//! assert_eq!(tree.path_to(&d), [a.clone(), c.clone(), d.clone()]);
//! assert_eq!(tree.len(), 4);
//!
//! let shortest = breadth_first(&graph, &a);
//! assert_eq!(shortest.path_to(&b), [a, b]);
//! ```
//!
//! Loading a real module tree:
//!
//! ```no_run
//! use modgraph::{GraphSource, ModuleRepository, ModuleId, SubsystemList, SubsystemReport};
//! use std::path::Path;
//!
//! let graph = ModuleRepository::open("/opt/wildfly/modules/system/layers/base")?.load()?;
//! let subsystems = SubsystemList::from_file(Path::new("subsystems.txt"))?;
//! let report = SubsystemReport::analyze(
//!     &graph,
//!     subsystems.modules(),
//!     &ModuleId::main("org.jboss.as.server"),
//! );
//! println!("{} core modules", report.core_modules.len());
//! # Ok::<(), modgraph::Error>(())
//! ```

mod config;
mod cycles;
mod error;
mod graph;
mod report;
mod search;
mod source;
mod subsystems;
mod types;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_ENTRY_POINT, OutputFormat};
pub use cycles::{Cycle, find_cycles};
pub use error::{Error, Result};
pub use graph::Graph;
pub use report::SubsystemReport;
pub use search::{
    AllPaths, AllPathsSearch, NoTermination, SearchTree, StopAtModules, TerminationPolicy,
    all_paths, breadth_first, depth_first, depth_first_with,
};
pub use source::{GraphSource, JAR_EXTENSION, MODULE_DESCRIPTOR, ModuleRepository};
pub use subsystems::{SubsystemClassifier, SubsystemList};
pub use types::{DEFAULT_SLOT, Dependency, ModuleId};

/// Phase ordering, re-exported from `modgraph-phases`.
pub use modgraph_phases as phases;
