//! Subsystem classification.
//!
//! A subsystem is a module that plugs a feature into the server. The set is
//! supplied from outside the graph, usually as a plain text list:
//!
//! ```text
//! # Subsystems shipped with the default profile
//! org.jboss.as.logging
//! org.jboss.as.naming
//! org.wildfly.extension.undertow:main
//! ```
//!
//! One identifier per line; blank lines and `#` comments are skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ModuleId;

/// Supplies the set of subsystem modules.
pub trait SubsystemClassifier {
    /// The subsystem modules.
    ///
    /// # Errors
    ///
    /// Returns an error if the classification can't be produced.
    fn subsystems(&self) -> Result<BTreeSet<ModuleId>>;
}

impl SubsystemClassifier for BTreeSet<ModuleId> {
    fn subsystems(&self) -> Result<BTreeSet<ModuleId>> {
        Ok(self.clone())
    }
}

/// A fixed list of subsystem modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsystemList {
    modules: BTreeSet<ModuleId>,
}

impl SubsystemList {
    /// Parse a subsystem list.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first line that isn't a valid
    /// module identifier.
    pub fn parse(text: &str) -> Result<Self> {
        let mut modules = BTreeSet::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let id = line
                .parse::<ModuleId>()
                .map_err(|e| Error::Config(format!("subsystem list line {}: {e}", index + 1)))?;
            modules.insert(id);
        }
        Ok(Self { modules })
    }

    /// Read and parse a subsystem list file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file can't be read and `Error::Config` if
    /// a line is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let list = Self::parse(&text)?;
        debug!(path = %path.display(), subsystems = list.len(), "Loaded subsystem list");
        Ok(list)
    }

    /// The listed modules, in identifier order.
    #[must_use]
    pub fn modules(&self) -> &BTreeSet<ModuleId> {
        &self.modules
    }

    /// Returns `true` if `id` is listed.
    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains(id)
    }

    /// Number of listed modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl SubsystemClassifier for SubsystemList {
    fn subsystems(&self) -> Result<BTreeSet<ModuleId>> {
        Ok(self.modules.clone())
    }
}

impl FromIterator<ModuleId> for SubsystemList {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}
