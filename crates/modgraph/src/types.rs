//! Domain types for module dependency graphs.
//!
//! - **`ModuleId`**: the key naming a graph node (module name + slot)
//! - **`Dependency`**: a directed edge between two modules
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Ordering | Case-insensitive name, then slot | Matches how module names are listed to users |
//! | Ordering tie-break | Case-sensitive compare | Keeps `Ord` consistent with structural `Eq` |
//! | Edge identity | `(from, to)` only | `optional` describes an edge, it does not make a new one |

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::Error;

/// Slot used when a module reference does not name one.
pub const DEFAULT_SLOT: &str = "main";

// ============================================================================
// Module identifiers
// ============================================================================

/// Identifies a module: its dotted name and the slot (variant) it lives in.
///
/// Textual form is `name:slot`; parsing a bare `name` yields slot `main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    name: String,
    slot: String,
}

impl ModuleId {
    /// Create an identifier from a name and a slot.
    #[must_use]
    pub fn new(name: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: slot.into(),
        }
    }

    /// Create an identifier in the default `main` slot.
    #[must_use]
    pub fn main(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_SLOT)
    }

    /// The module name, e.g. `org.jboss.as.server`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The slot, e.g. `main`.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Ord for ModuleId {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.name, &other.name)
            .then_with(|| cmp_ignore_case(&self.slot, &other.slot))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.slot.cmp(&other.slot))
    }
}

impl PartialOrd for ModuleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.slot)
    }
}

impl FromStr for ModuleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, slot) = s.split_once(':').unwrap_or((s, DEFAULT_SLOT));
        if name.is_empty() || slot.is_empty() || slot.contains(':') {
            return Err(Error::InvalidModuleId(s.to_string()));
        }
        Ok(Self::new(name, slot))
    }
}

// ============================================================================
// Dependencies
// ============================================================================

/// A directed dependency from one module to another.
///
/// Equality, hashing and ordering only look at the endpoints: two edges
/// between the same pair of modules are the same edge whether or not they
/// are optional.
#[derive(Debug, Clone)]
pub struct Dependency {
    from: ModuleId,
    to: ModuleId,
    optional: bool,
}

impl Dependency {
    /// Create a dependency edge.
    #[must_use]
    pub fn new(from: ModuleId, to: ModuleId, optional: bool) -> Self {
        Self { from, to, optional }
    }

    /// Create a required dependency edge.
    #[must_use]
    pub fn required(from: ModuleId, to: ModuleId) -> Self {
        Self::new(from, to, false)
    }

    /// The depending module.
    #[must_use]
    pub fn from(&self) -> &ModuleId {
        &self.from
    }

    /// The module depended upon.
    #[must_use]
    pub fn to(&self) -> &ModuleId {
        &self.to
    }

    /// Whether the dependency was declared optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The same edge pointing the other way, keeping the optional flag.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone(), self.optional)
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl Ord for Dependency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from
            .cmp(&other.from)
            .then_with(|| self.to.cmp(&other.to))
    }
}

impl PartialOrd for Dependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)?;
        if self.optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case::bare_name("org.jboss.as.server", "org.jboss.as.server", "main")]
    #[case::with_slot("org.hibernate:4.3", "org.hibernate", "4.3")]
    #[case::surrounding_whitespace("  javax.api  ", "javax.api", "main")]
    fn parses_module_ids(#[case] input: &str, #[case] name: &str, #[case] slot: &str) {
        let id: ModuleId = input.parse().unwrap();
        assert_eq!(id.name(), name);
        assert_eq!(id.slot(), slot);
    }

    #[rstest]
    #[case::empty("")]
    #[case::empty_name(":main")]
    #[case::empty_slot("org.foo:")]
    #[case::two_colons("org.foo:a:b")]
    fn rejects_malformed_module_ids(#[case] input: &str) {
        let err = input.parse::<ModuleId>().unwrap_err();
        assert!(matches!(err, Error::InvalidModuleId(_)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let id = ModuleId::new("org.jboss.logging", "1.1");
        assert_eq!(id.to_string(), "org.jboss.logging:1.1");
        assert_eq!(id.to_string().parse::<ModuleId>().unwrap(), id);
    }

    #[test]
    fn ordering_ignores_case_then_compares_slot() {
        let mut ids = vec![
            ModuleId::main("org.b"),
            ModuleId::new("ORG.A", "main"),
            ModuleId::new("org.a", "2.0"),
            ModuleId::main("Org.C"),
        ];
        ids.sort();

        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["org.a:2.0", "ORG.A:main", "org.b:main", "Org.C:main"]);
    }

    #[test]
    fn ordering_is_consistent_with_equality() {
        let upper = ModuleId::main("ORG.A");
        let lower = ModuleId::main("org.a");
        assert_ne!(upper, lower);
        assert_ne!(upper.cmp(&lower), Ordering::Equal);
    }

    #[test]
    fn edge_identity_ignores_optional_flag() {
        let a = ModuleId::main("a");
        let b = ModuleId::main("b");
        let required = Dependency::new(a.clone(), b.clone(), false);
        let optional = Dependency::new(a, b, true);

        assert_eq!(required, optional);
        let set: HashSet<_> = [required, optional].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn reversed_keeps_optional_flag() {
        let edge = Dependency::new(ModuleId::main("a"), ModuleId::main("b"), true);
        let reversed = edge.reversed();

        assert_eq!(reversed.from(), &ModuleId::main("b"));
        assert_eq!(reversed.to(), &ModuleId::main("a"));
        assert!(reversed.is_optional());
        assert_eq!(edge.to_string(), "a:main->b:main (optional)");
    }
}
