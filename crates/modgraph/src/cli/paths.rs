//! `modgraph paths` command implementation.

use colored::Colorize;
use modgraph::{AllPathsSearch, ModuleId, OutputFormat, Result};

use super::Context;
use super::display::{format_path, print_csv_row};

/// Run the paths command.
pub fn run(context: &Context, from: &ModuleId, to: &ModuleId, limit: Option<usize>) -> Result<()> {
    let graph = context.load_graph()?;

    let mut search = AllPathsSearch::new(&graph, from, to);
    if let Some(limit) = limit {
        search = search.with_limit(limit);
    }
    let paths = search.run();

    match context.format() {
        OutputFormat::Csv => {
            print_csv_row(&["path", "step", "module"]);
            for (index, path) in paths.paths().iter().enumerate() {
                for (step, module) in path.iter().enumerate() {
                    print_csv_row(&[(index + 1).to_string(), step.to_string(), module.to_string()]);
                }
            }
            // Keep stdout parseable; the notice goes to stderr.
            if paths.is_truncated() {
                eprintln!(
                    "{}: stopped at the path limit; more paths exist",
                    "note".yellow()
                );
            }
        }
        OutputFormat::Text => {
            if paths.is_empty() {
                println!(
                    "No paths from {} to {}",
                    from.to_string().cyan(),
                    to.to_string().cyan()
                );
                return Ok(());
            }

            println!(
                "Found {} paths from {} to {}:",
                paths.len().to_string().green().bold(),
                from.to_string().cyan().bold(),
                to.to_string().cyan().bold()
            );
            println!();
            for (index, path) in paths.paths().iter().enumerate() {
                println!("  {} {}:", "Path".yellow().bold(), index + 1);
                println!("    {}", format_path(path).dimmed());
            }
            if paths.is_truncated() {
                println!();
                println!(
                    "{}",
                    "Stopped at the path limit; more paths exist.".yellow()
                );
            }
        }
    }

    Ok(())
}
