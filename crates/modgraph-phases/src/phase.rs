//! A single phase and its topological sort.
//!
//! A [`Phase`] owns the units registered into it and the names each unit
//! depends on. Sorting is a depth-first topological sort driven by an
//! explicit work stack, so long dependency chains cannot overflow the call
//! stack.
//!
//! ## Ordering
//!
//! - Units are visited in registration order.
//! - Each unit's dependency names are visited in name order.
//! - A unit is emitted when everything it depends on has been emitted.
//!
//! Dependency names that match no unit in the phase are treated as already
//! satisfied. This is how a unit declares a dependency on a unit that lives
//! in an earlier phase; it also means a misspelled name goes unnoticed here
//! (see [`crate::Phases::unresolved_dependencies`] for the strict check).

use std::collections::btree_set;
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::error::{Result, SortError};

/// Something that can be registered into a phase under a unique name.
pub trait Unit {
    /// The name other units use to depend on this one.
    fn name(&self) -> &str;
}

impl Unit for String {
    fn name(&self) -> &str {
        self
    }
}

impl Unit for &str {
    fn name(&self) -> &str {
        self
    }
}

#[derive(Debug, Clone)]
struct Entry<U> {
    unit: U,
    dependencies: BTreeSet<String>,
}

/// Visit state of a unit during one sort pass. Absent means unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Finished,
}

/// One frame of the explicit depth-first work stack.
struct Frame<'a, U> {
    name: &'a str,
    entry: &'a Entry<U>,
    dependencies: btree_set::Iter<'a, String>,
}

/// A named, ordered scope of units whose mutual dependencies are linearized
/// independently of other phases.
#[derive(Debug, Clone)]
pub struct Phase<U> {
    name: String,
    units: HashMap<String, Entry<U>>,
    order: Vec<String>,
}

impl<U> Phase<U> {
    /// Create an empty phase.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The phase name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no unit has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if a unit with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Unit names in registration order.
    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Look up a unit by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&U> {
        self.units.get(name).map(|entry| &entry.unit)
    }

    /// The dependency names declared for a unit.
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.units.get(name).map(|entry| &entry.dependencies)
    }
}

impl<U: Unit> Phase<U> {
    /// Register a unit and the names of the units it depends on.
    ///
    /// Repeated dependency names collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::DuplicateUnit`] if a unit with the same name is
    /// already registered; the phase is left unchanged.
    pub fn add<I, S>(&mut self, unit: U, dependencies: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = unit.name().to_string();
        if self.units.contains_key(&name) {
            return Err(SortError::DuplicateUnit {
                phase: self.name.clone(),
                unit: name,
            });
        }

        let dependencies: BTreeSet<String> = dependencies.into_iter().map(Into::into).collect();
        trace!(
            phase = %self.name,
            unit = %name,
            dependencies = dependencies.len(),
            "Registered unit"
        );

        self.order.push(name.clone());
        self.units.insert(name, Entry { unit, dependencies });
        Ok(())
    }

    /// Linearize the phase so every unit follows the units it depends on.
    ///
    /// The result is the completion order of a depth-first traversal. It is
    /// fully determined by registration order and dependency names, so
    /// sorting the same phase twice yields the same order. The phase itself
    /// is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Cycle`] as soon as a dependency cycle is found.
    /// No partial order is returned.
    pub fn sort(&self) -> Result<Vec<&U>> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.units.len());
        let mut sorted = Vec::with_capacity(self.units.len());
        let mut stack: Vec<Frame<'_, U>> = Vec::new();

        for name in &self.order {
            if marks.contains_key(name.as_str()) {
                continue;
            }
            let Some(entry) = self.units.get(name) else {
                continue;
            };
            marks.insert(name, Mark::OnStack);
            stack.push(Frame {
                name,
                entry,
                dependencies: entry.dependencies.iter(),
            });

            while let Some(frame) = stack.last_mut() {
                let current = frame.name;
                let Some(dependency) = frame.dependencies.next() else {
                    let entry = frame.entry;
                    stack.pop();
                    marks.insert(current, Mark::Finished);
                    sorted.push(&entry.unit);
                    continue;
                };

                let Some(dependency_entry) = self.units.get(dependency) else {
                    trace!(
                        phase = %self.name,
                        unit = current,
                        dependency = %dependency,
                        "Dependency is not a unit of this phase, treating as satisfied"
                    );
                    continue;
                };

                match marks.get(dependency.as_str()) {
                    Some(Mark::Finished) => {}
                    Some(Mark::OnStack) => return Err(self.cycle_error(&stack, dependency)),
                    None => {
                        marks.insert(dependency, Mark::OnStack);
                        stack.push(Frame {
                            name: dependency,
                            entry: dependency_entry,
                            dependencies: dependency_entry.dependencies.iter(),
                        });
                    }
                }
            }
        }

        debug!(phase = %self.name, units = sorted.len(), "Sorted phase");
        Ok(sorted)
    }

    fn cycle_error(&self, stack: &[Frame<'_, U>], unit: &str) -> SortError {
        let start = stack
            .iter()
            .position(|frame| frame.name == unit)
            .unwrap_or(0);
        let mut cycle: Vec<String> = stack[start..]
            .iter()
            .map(|frame| frame.name.to_string())
            .collect();
        cycle.push(unit.to_string());

        debug!(phase = %self.name, unit, cycle_len = cycle.len() - 1, "Dependency cycle detected");
        SortError::Cycle {
            phase: self.name.clone(),
            unit: unit.to_string(),
            cycle,
        }
    }
}
