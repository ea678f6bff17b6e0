//! `modgraph sort` command implementation.
//!
//! Phase files are YAML:
//!
//! ```yaml
//! phases:
//!   - name: Parse
//!     units:
//!       - name: structure
//!         depends-on: [annotations]
//!       - name: annotations
//!   - name: Install
//!     units:
//!       - name: deploy
//!         depends-on: [structure]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use colored::Colorize;
use modgraph::phases::{Phase, Phases, SortedPhase};
use modgraph::{Error, OutputFormat, Result};
use serde::Deserialize;
use tracing::debug;

use super::Context;
use super::display::print_csv_row;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhaseFile {
    phases: Vec<PhaseEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhaseEntry {
    name: String,
    #[serde(default)]
    units: Vec<UnitEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct UnitEntry {
    name: String,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Run the sort command.
pub fn run(context: &Context, file: &Path, strict: bool) -> Result<()> {
    let phases = load(file)?;

    let sorted = if strict {
        phases.sort_strict()?
    } else {
        phases.sort()?
    };

    match context.format() {
        OutputFormat::Csv => print_csv(&sorted),
        OutputFormat::Text => print_text(&sorted),
    }
    Ok(())
}

fn load(file: &Path) -> Result<Phases<String>> {
    let content = fs::read_to_string(file)?;
    let parsed: PhaseFile = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {e}", file.display())))?;

    let mut seen = HashSet::new();
    let mut phases = Phases::default();
    for entry in parsed.phases {
        if !seen.insert(entry.name.clone()) {
            return Err(Error::Config(format!(
                "{}: phase '{}' is defined twice",
                file.display(),
                entry.name
            )));
        }
        let mut phase = Phase::new(entry.name);
        for unit in entry.units {
            phase.add(unit.name, unit.depends_on)?;
        }
        phases.push(phase);
    }

    debug!(path = %file.display(), phases = phases.len(), "Loaded phase file");
    Ok(phases)
}

fn print_csv(sorted: &[SortedPhase<'_, String>]) {
    print_csv_row(&["phase", "position", "unit"]);
    for phase in sorted {
        for (position, unit) in phase.names().into_iter().enumerate() {
            print_csv_row(&[phase.phase.to_string(), (position + 1).to_string(), unit.to_string()]);
        }
    }
}

fn print_text(sorted: &[SortedPhase<'_, String>]) {
    for phase in sorted {
        println!(
            "{} ({} units):",
            phase.phase.white().bold(),
            phase.units.len().to_string().green()
        );
        for (position, unit) in phase.names().into_iter().enumerate() {
            println!("    {} {unit}", format!("{:>3}.", position + 1).dimmed());
        }
    }
}
