//! `modgraph path` command implementation.

use colored::Colorize;
use modgraph::{ModuleId, OutputFormat, Result, breadth_first, depth_first};

use super::Context;
use super::display::{format_path, print_csv_row};

/// Run the path command.
pub fn run(context: &Context, from: &ModuleId, to: &ModuleId, dfs: bool) -> Result<()> {
    let graph = context.load_graph()?;

    let tree = if dfs {
        depth_first(&graph, from)
    } else {
        breadth_first(&graph, from)
    };
    let path = tree.path_to(to);

    match context.format() {
        OutputFormat::Csv => {
            print_csv_row(&["step", "module"]);
            for (step, module) in path.iter().enumerate() {
                print_csv_row(&[step.to_string(), module.to_string()]);
            }
        }
        OutputFormat::Text => {
            if path.is_empty() {
                println!(
                    "{} does not depend on {}",
                    from.to_string().cyan(),
                    to.to_string().cyan()
                );
            } else {
                let title = if dfs { "Path" } else { "Shortest path" };
                println!(
                    "{} from {} to {} ({} steps):",
                    title.white().bold(),
                    from.to_string().cyan().bold(),
                    to.to_string().cyan().bold(),
                    path.len() - 1
                );
                println!("    {}", format_path(&path));
            }
        }
    }

    Ok(())
}
