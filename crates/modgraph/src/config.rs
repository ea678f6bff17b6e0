//! Configuration file support.
//!
//! Settings are read from `modgraph.yaml`:
//!
//! ```yaml
//! modules-dir: build/modules/system/layers/base
//! subsystems-file: subsystems.txt
//! entry-point: org.jboss.as.server
//! format: text
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the configuration file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ModuleId;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "modgraph.yaml";

/// Entry module used for subsystem analysis when none is configured.
pub const DEFAULT_ENTRY_POINT: &str = "org.jboss.as.server";

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored when writing to a terminal
    #[default]
    Text,
    /// Comma-separated values with a header row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            other => Err(Error::Config(format!(
                "unknown output format '{other}' (expected text or csv)"
            ))),
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Root of the module repository
    pub modules_dir: Option<PathBuf>,

    /// Subsystem list file
    pub subsystems_file: Option<PathBuf>,

    /// Entry module for subsystem analysis
    pub entry_point: String,

    /// Output format
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modules_dir: None,
            subsystems_file: None,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the YAML is malformed or has unknown keys.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file can't be read and `Error::Config` if
    /// it can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.modules_dir = config.modules_dir.map(|dir| base.join(dir));
            config.subsystems_file = config.subsystems_file.map(|file| base.join(file));
        }
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, otherwise `modgraph.yaml` in `dir` if it
    /// exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file can't be read or parsed. A
    /// missing `modgraph.yaml` is not an error; a missing explicit file is.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// The configured entry module.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidModuleId` if `entry-point` isn't a valid
    /// identifier.
    pub fn entry(&self) -> Result<ModuleId> {
        self.entry_point.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.entry_point, DEFAULT_ENTRY_POINT);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.modules_dir.is_none());
        assert_eq!(config.entry().unwrap(), ModuleId::main(DEFAULT_ENTRY_POINT));
    }

    #[test]
    fn parses_kebab_case_keys() {
        let config = Config::parse(
            "modules-dir: /opt/wildfly/modules\nentry-point: org.example:1\nformat: csv\n",
        )
        .unwrap();

        assert_eq!(config.modules_dir, Some(PathBuf::from("/opt/wildfly/modules")));
        assert_eq!(config.entry().unwrap(), ModuleId::new("org.example", "1"));
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(config.subsystems_file.is_none());
    }

    #[rstest]
    #[case::unknown_key("modules_dir: x\n")]
    #[case::bad_format("format: xml\n")]
    #[case::not_a_map("- a\n- b\n")]
    fn rejects_invalid_yaml(#[case] yaml: &str) {
        assert!(matches!(Config::parse(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(Config::parse("\n").unwrap(), Config::default());
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "modules-dir: modules\nsubsystems-file: subsystems.txt\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.modules_dir, Some(temp.path().join("modules")));
        assert_eq!(config.subsystems_file, Some(temp.path().join("subsystems.txt")));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Config::discover(None, temp.path()).unwrap(), Config::default());

        fs::write(temp.path().join(CONFIG_FILE_NAME), "format: csv\n").unwrap();
        assert_eq!(
            Config::discover(None, temp.path()).unwrap().format,
            OutputFormat::Csv
        );

        let missing = temp.path().join("other.yaml");
        assert!(matches!(
            Config::discover(Some(&missing), temp.path()),
            Err(Error::Io(_))
        ));
    }

    #[rstest]
    #[case("text", OutputFormat::Text)]
    #[case("CSV", OutputFormat::Csv)]
    fn parses_output_format(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
    }
}
