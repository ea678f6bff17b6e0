//! Per-run registry of unit names across a phase sequence.

use std::collections::BTreeMap;

use crate::phases::Phases;

/// Every unit name known to one analysis run, with the earliest phase that
/// defines it.
///
/// Built from a [`Phases`] value and discarded with it; nothing here is
/// shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitRegistry {
    names: BTreeMap<String, usize>,
}

impl UnitRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every unit of every phase.
    #[must_use]
    pub fn from_phases<U>(phases: &Phases<U>) -> Self {
        let mut registry = Self::new();
        for (index, phase) in phases.iter().enumerate() {
            for name in phase.unit_names() {
                registry.register(index, name);
            }
        }
        registry
    }

    /// Record that `name` is defined in the phase at `phase_index`.
    ///
    /// The earliest phase wins when a name is defined more than once.
    pub fn register(&mut self, phase_index: usize, name: &str) {
        self.names
            .entry(name.to_string())
            .and_modify(|index| *index = (*index).min(phase_index))
            .or_insert(phase_index);
    }

    /// Index of the earliest phase defining `name`.
    #[must_use]
    pub fn phase_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Returns `true` if `name` is defined in the phase at `phase_index` or
    /// in an earlier one.
    #[must_use]
    pub fn is_visible_from(&self, name: &str, phase_index: usize) -> bool {
        self.phase_of(name).is_some_and(|index| index <= phase_index)
    }

    /// Number of distinct unit names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
