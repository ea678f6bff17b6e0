//! Ordered sequences of phases.
//!
//! Each phase is sorted on its own; nothing crosses a phase boundary during
//! sorting. The position of a phase in the sequence defines its previous
//! phase, which is where names that a unit depends on but its own phase does
//! not define are expected to live.

use tracing::{debug, warn};

use crate::error::{Result, SortError};
use crate::phase::{Phase, Unit};
use crate::registry::UnitRegistry;

/// The sorted units of one phase.
#[derive(Debug, Clone)]
pub struct SortedPhase<'a, U> {
    /// Name of the phase.
    pub phase: &'a str,
    /// Units in dependency order.
    pub units: Vec<&'a U>,
}

impl<U: Unit> SortedPhase<'_, U> {
    /// Unit names in dependency order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(|unit| unit.name()).collect()
    }
}

/// A dependency name that resolves to no unit in its phase or any earlier
/// phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependency {
    /// Phase declaring the dependency.
    pub phase: String,
    /// Unit declaring the dependency.
    pub unit: String,
    /// The name that did not resolve.
    pub dependency: String,
}

/// An ordered collection of phases.
#[derive(Debug, Clone)]
pub struct Phases<U> {
    phases: Vec<Phase<U>>,
}

impl<U> Default for Phases<U> {
    fn default() -> Self {
        Self { phases: Vec::new() }
    }
}

impl<U> Phases<U> {
    /// Create a sequence from phases in execution order.
    pub fn new(phases: impl IntoIterator<Item = Phase<U>>) -> Self {
        Self {
            phases: phases.into_iter().collect(),
        }
    }

    /// Append a phase at the end of the sequence.
    pub fn push(&mut self, phase: Phase<U>) {
        self.phases.push(phase);
    }

    /// Number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns `true` if the sequence has no phases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Phase<U>> {
        self.phases.iter()
    }

    /// Look up a phase by name. The first phase with that name wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Phase<U>> {
        self.phases.iter().find(|phase| phase.name() == name)
    }

    /// The phase before the one at `index`, or `None` for the first phase.
    #[must_use]
    pub fn previous(&self, index: usize) -> Option<&Phase<U>> {
        index.checked_sub(1).and_then(|i| self.phases.get(i))
    }

    /// Build the registry of unit names for this run.
    #[must_use]
    pub fn registry(&self) -> UnitRegistry {
        UnitRegistry::from_phases(self)
    }

    /// Dependency names that match no unit in the declaring phase or an
    /// earlier one.
    ///
    /// Sorting ignores such names; this is the opt-in check for callers that
    /// want typos reported.
    #[must_use]
    pub fn unresolved_dependencies(&self) -> Vec<UnresolvedDependency> {
        let registry = self.registry();
        let mut unresolved = Vec::new();

        for (index, phase) in self.phases.iter().enumerate() {
            for unit in phase.unit_names() {
                let Some(dependencies) = phase.dependencies_of(unit) else {
                    continue;
                };
                for dependency in dependencies {
                    if !registry.is_visible_from(dependency, index) {
                        unresolved.push(UnresolvedDependency {
                            phase: phase.name().to_string(),
                            unit: unit.to_string(),
                            dependency: dependency.clone(),
                        });
                    }
                }
            }
        }

        unresolved
    }
}

impl<U: Unit> Phases<U> {
    /// Register a unit into the named phase.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::UnknownPhase`] if no phase has that name, or
    /// [`SortError::DuplicateUnit`] if the phase already has the unit.
    pub fn add<I, S>(&mut self, phase: &str, unit: U, dependencies: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phases
            .iter_mut()
            .find(|p| p.name() == phase)
            .ok_or_else(|| SortError::UnknownPhase(phase.to_string()))?
            .add(unit, dependencies)
    }

    /// Sort every phase in sequence order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SortError::Cycle`] encountered; phases after the
    /// failing one are not sorted.
    pub fn sort(&self) -> Result<Vec<SortedPhase<'_, U>>> {
        let sorted = self
            .phases
            .iter()
            .map(|phase| {
                Ok(SortedPhase {
                    phase: phase.name(),
                    units: phase.sort()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(phases = sorted.len(), "Sorted phase sequence");
        Ok(sorted)
    }

    /// Sort every phase after checking that every dependency name resolves.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::UnresolvedDependencies`] if any dependency name
    /// is unresolved, otherwise the errors of [`Phases::sort`].
    pub fn sort_strict(&self) -> Result<Vec<SortedPhase<'_, U>>> {
        let unresolved = self.unresolved_dependencies();
        if let Some(first) = unresolved.first() {
            for missing in &unresolved {
                warn!(
                    phase = %missing.phase,
                    unit = %missing.unit,
                    dependency = %missing.dependency,
                    "Unresolved dependency name"
                );
            }
            return Err(SortError::UnresolvedDependencies {
                count: unresolved.len(),
                first: first.dependency.clone(),
            });
        }
        self.sort()
    }
}

impl<'a, U> IntoIterator for &'a Phases<U> {
    type Item = &'a Phase<U>;
    type IntoIter = std::slice::Iter<'a, Phase<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
