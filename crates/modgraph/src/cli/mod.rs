//! CLI command implementations.

mod display;

pub mod cycles;
pub mod dependents;
pub mod path;
pub mod paths;
pub mod reachable;
pub mod resources;
pub mod sort;
pub mod subsystems;

use std::path::{Path, PathBuf};

use modgraph::{
    Config, Error, Graph, GraphSource, ModuleRepository, OutputFormat, Result, SubsystemList,
};

/// Command-line values that take precedence over the configuration file.
pub struct Overrides {
    pub modules: Option<PathBuf>,
    pub subsystems: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Settings every command runs with.
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn new(config_file: Option<&Path>, working_dir: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = Config::discover(config_file, working_dir)?;
        if overrides.modules.is_some() {
            config.modules_dir = overrides.modules;
        }
        if overrides.subsystems.is_some() {
            config.subsystems_file = overrides.subsystems;
        }
        if let Some(format) = overrides.format {
            config.format = format;
        }
        Ok(Self { config })
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Open the configured module repository.
    pub fn repository(&self) -> Result<ModuleRepository> {
        let root = self.config.modules_dir.as_ref().ok_or_else(|| {
            Error::Config("no module repository given; use --modules or set modules-dir".into())
        })?;
        ModuleRepository::open(root.clone())
    }

    /// Load the module graph from the configured repository.
    pub fn load_graph(&self) -> Result<Graph> {
        self.repository()?.load()
    }

    /// Load the configured subsystem list.
    pub fn load_subsystems(&self) -> Result<SubsystemList> {
        let path = self.config.subsystems_file.as_ref().ok_or_else(|| {
            Error::Config(
                "no subsystem list given; use --subsystems or set subsystems-file".into(),
            )
        })?;
        SubsystemList::from_file(path)
    }
}
