//! Error types for modgraph operations.
//!
//! The graph engine itself never fails: unknown modules have no edges and
//! unreached modules have empty paths. Errors come from the edges of the
//! system:
//!
//! - **Loading**: unreadable or malformed module descriptors, bad subsystem lists
//! - **Input**: malformed module identifiers, invalid configuration
//! - **Sorting**: cycles and registration mistakes in phase files

use std::path::PathBuf;
use thiserror::Error;

/// Result type for modgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for modgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A module descriptor could not be read or parsed
    #[error("invalid module descriptor {}: {message}", path.display())]
    Descriptor {
        /// Path of the descriptor
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// A module identifier could not be parsed
    #[error("invalid module identifier: '{0}'")]
    InvalidModuleId(String),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Phase sorting failed
    #[error("sort failed: {0}")]
    Sort(#[from] modgraph_phases::SortError),
}

impl Error {
    /// Create a descriptor error for a file.
    #[must_use]
    pub fn descriptor(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            path: path.into(),
            message: message.into(),
        }
    }
}
