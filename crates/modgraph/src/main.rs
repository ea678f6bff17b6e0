//! modgraph CLI - module dependency analysis from the command line.
//!
//! modgraph loads a directory tree of `module.xml` descriptors and answers
//! reachability, path, subsystem and cycle questions about it. It also
//! orders phase files whose units declare dependencies on each other.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use modgraph::{ModuleId, OutputFormat};
use tracing_subscriber::EnvFilter;

mod cli;

/// modgraph: module dependency graph analysis.
#[derive(Parser)]
#[command(name = "modgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./modgraph.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Module repository root (overrides `modules-dir`)
    #[arg(short, long, global = true)]
    modules: Option<PathBuf>,

    /// Subsystem list file (overrides `subsystems-file`)
    #[arg(short, long, global = true)]
    subsystems: Option<PathBuf>,

    /// Output format: text or csv (overrides `format`)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every module a module depends on, directly or transitively
    Reachable {
        /// Module identifier (`name` or `name:slot`)
        module: ModuleId,

        /// Build the tree breadth-first (shortest paths) instead of depth-first
        #[arg(long)]
        bfs: bool,
    },

    /// Show how one module reaches another
    Path {
        /// Starting module
        from: ModuleId,

        /// Target module
        to: ModuleId,

        /// Report the depth-first tree path instead of a shortest path
        #[arg(long)]
        dfs: bool,
    },

    /// List every simple path between two modules
    Paths {
        /// Starting module
        from: ModuleId,

        /// Target module
        to: ModuleId,

        /// Stop after this many paths
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List every module that depends on a module, directly or transitively
    Dependents {
        /// Module identifier (`name` or `name:slot`)
        module: ModuleId,
    },

    /// Analyze which subsystems the entry module reaches, and how
    Subsystems {
        /// Entry module (overrides `entry-point`)
        #[arg(short, long)]
        entry: Option<ModuleId>,
    },

    /// Detect circular module dependencies
    Cycles,

    /// List the jar files shipped in each module's directory
    Resources,

    /// Order the units of a YAML phase file
    Sort {
        /// Phase file
        file: PathBuf,

        /// Fail if a dependency name matches no unit
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> modgraph::Result<()> {
    let working_dir = std::env::current_dir()?;
    let context = cli::Context::new(
        cli.config.as_deref(),
        &working_dir,
        cli::Overrides {
            modules: cli.modules,
            subsystems: cli.subsystems,
            format: cli.format,
        },
    )?;

    match cli.command {
        Commands::Reachable { module, bfs } => cli::reachable::run(&context, &module, bfs),
        Commands::Path { from, to, dfs } => cli::path::run(&context, &from, &to, dfs),
        Commands::Paths { from, to, limit } => cli::paths::run(&context, &from, &to, limit),
        Commands::Dependents { module } => cli::dependents::run(&context, &module),
        Commands::Subsystems { entry } => cli::subsystems::run(&context, entry),
        Commands::Cycles => cli::cycles::run(&context),
        Commands::Resources => cli::resources::run(&context),
        Commands::Sort { file, strict } => cli::sort::run(&context, &file, strict),
    }
}
