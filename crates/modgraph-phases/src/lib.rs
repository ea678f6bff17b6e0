//! Phase-scoped topological sorting of named processing units.
//!
//! Units are registered into ordered [`Phase`]s together with the names of
//! the units they depend on. Each phase is linearized independently so that
//! every unit comes after everything it depends on, and dependency cycles
//! are reported with the unit that closed them.
//!
//! ```
//! use modgraph_phases::{Phase, Phases};
//!
//! let mut phases = Phases::new([Phase::new("parse")]);
//! phases.add("parse", "structure", ["annotations"])?;
//! phases.add("parse", "annotations", [] as [&str; 0])?;
//!
//! let sorted = phases.sort()?;
//! assert_eq!(sorted[0].names(), ["annotations", "structure"]);
//! # Ok::<(), modgraph_phases::SortError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod phase;
pub mod phases;
pub mod registry;

pub use error::{Result, SortError};
pub use phase::{Phase, Unit};
pub use phases::{Phases, SortedPhase, UnresolvedDependency};
pub use registry::UnitRegistry;
