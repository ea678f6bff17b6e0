//! Error types for phase sorting.

use thiserror::Error;

/// The error type for phase registration and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A dependency cycle was found while sorting a phase.
    ///
    /// `unit` is the unit that was reached again while still being visited;
    /// `cycle` is the dependency chain from `unit` back to itself.
    #[error("dependency cycle in phase '{phase}' at unit '{unit}': {}", cycle.join(" -> "))]
    Cycle {
        /// Phase being sorted.
        phase: String,
        /// Unit at which the cycle was detected.
        unit: String,
        /// Units on the cycle.
        cycle: Vec<String>,
    },

    /// A unit was registered twice under the same name in one phase.
    #[error("unit '{unit}' is already registered in phase '{phase}'")]
    DuplicateUnit {
        /// Phase the unit was added to.
        phase: String,
        /// Name of the duplicate unit.
        unit: String,
    },

    /// A unit was added to a phase that is not part of the sequence.
    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    /// Strict validation found dependency names that resolve to no unit.
    #[error("{count} unresolved dependency name(s), first: '{first}'")]
    UnresolvedDependencies {
        /// Number of unresolved names.
        count: usize,
        /// The first unresolved name, for reporting.
        first: String,
    },
}

/// A specialized Result type for phase operations.
pub type Result<T> = std::result::Result<T, SortError>;
