//! `modgraph subsystems` command implementation.

use colored::Colorize;
use modgraph::{ModuleId, OutputFormat, Result, SubsystemClassifier, SubsystemReport};

use super::Context;
use super::display::{csv_path, format_path, print_csv_row, print_modules};

/// Run the subsystems command.
pub fn run(context: &Context, entry: Option<ModuleId>) -> Result<()> {
    let entry = match entry {
        Some(entry) => entry,
        None => context.config.entry()?,
    };
    let subsystems = context.load_subsystems()?.subsystems()?;
    let graph = context.load_graph()?;

    let report = SubsystemReport::analyze(&graph, &subsystems, &entry);

    match context.format() {
        OutputFormat::Csv => print_csv(&report),
        OutputFormat::Text => print_text(&report, |module| subsystems.contains(module)),
    }
    Ok(())
}

fn print_csv(report: &SubsystemReport) {
    print_csv_row(&["section", "subsystem", "value"]);
    for subsystem in &report.unreachable {
        print_csv_row(&["unreachable".to_string(), subsystem.to_string(), String::new()]);
    }
    for (subsystem, path) in &report.reachable {
        print_csv_row(&["reachable".to_string(), subsystem.to_string(), csv_path(path)]);
    }
    for module in &report.core_modules {
        print_csv_row(&["core".to_string(), String::new(), module.to_string()]);
    }
    for (subsystem, path) in &report.direct_subsystems {
        print_csv_row(&["direct".to_string(), subsystem.to_string(), csv_path(path)]);
    }
    for (subsystem, modules) in &report.exclusive_modules {
        for module in modules {
            print_csv_row(&["exclusive".to_string(), subsystem.to_string(), module.to_string()]);
        }
    }
}

fn print_text(report: &SubsystemReport, is_subsystem: impl Fn(&ModuleId) -> bool) {
    let entry = report.entry.to_string();

    section(&format!("Subsystems not reachable from {entry}"), report.unreachable.len());
    print_modules(report.unreachable.iter(), "(none)");

    section(&format!("Subsystems reachable from {entry}"), report.reachable.len());
    for (subsystem, path) in &report.reachable {
        println!("    {} {}", "•".dimmed(), subsystem.to_string().white());
        println!("        {}", format_path(path).dimmed());
    }

    section(
        &format!("Modules reachable from {entry} without passing a subsystem"),
        report.core_modules.len(),
    );
    print_modules(report.core_modules.iter(), "(none)");

    section(
        &format!("Subsystems reachable from {entry} not via another subsystem"),
        report.direct_subsystems.len(),
    );
    for (subsystem, path) in &report.direct_subsystems {
        println!("    {} {}", "•".dimmed(), subsystem.to_string().white());
        println!("        {}", format_path(path).dimmed());
    }

    section(
        "Modules reachable from each subsystem, apart from the core",
        report.exclusive_modules.len(),
    );
    for (subsystem, modules) in &report.exclusive_modules {
        println!("  {} {}", "---".dimmed(), subsystem.to_string().cyan().bold());
        // Subsystems first, marked, then plain modules.
        let (marked, plain): (Vec<&ModuleId>, Vec<&ModuleId>) =
            modules.iter().partition(|module| is_subsystem(*module));
        for module in marked {
            println!("    {} {module} {}", "•".dimmed(), "*".yellow());
        }
        for module in plain {
            println!("    {} {module}", "•".dimmed());
        }
    }
}

fn section(title: &str, count: usize) {
    println!();
    println!(
        "{} ({})",
        title.white().bold(),
        count.to_string().green()
    );
}
