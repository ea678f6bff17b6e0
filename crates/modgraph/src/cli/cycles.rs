//! `modgraph cycles` command implementation.

use colored::Colorize;
use modgraph::{OutputFormat, Result, find_cycles};

use super::Context;
use super::display::{format_path, print_csv_row};

/// Run the cycles command.
pub fn run(context: &Context) -> Result<()> {
    let graph = context.load_graph()?;

    let cycles = find_cycles(&graph);

    if context.format() == OutputFormat::Csv {
        print_csv_row(&["cycle", "module"]);
        for (index, cycle) in cycles.iter().enumerate() {
            for module in cycle.modules() {
                print_csv_row(&[(index + 1).to_string(), module.to_string()]);
            }
        }
        return Ok(());
    }

    if cycles.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return Ok(());
    }

    println!(
        "Found {} circular dependencies:",
        cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in cycles.iter().enumerate() {
        println!("  {} {} ({} modules):", "Cycle".yellow().bold(), i + 1, cycle.len());

        // Close the loop: a → b → a
        let mut path = format_path(cycle.modules());
        if let Some(first) = cycle.modules().first() {
            path.push_str(" → ");
            path.push_str(&first.to_string());
        }
        println!("    {}", path.dimmed());
    }

    Ok(())
}
