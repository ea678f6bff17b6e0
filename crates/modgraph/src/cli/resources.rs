//! `modgraph resources` command implementation.

use colored::Colorize;
use modgraph::{OutputFormat, Result};

use super::Context;
use super::display::print_csv_row;

/// Run the resources command.
///
/// Modules without jar files are left out. The CSV `owner` column is
/// always empty, ready to be filled in by whoever takes each library.
pub fn run(context: &Context) -> Result<()> {
    let resources = context.repository()?.jar_resources()?;
    let with_jars: Vec<_> = resources.iter().filter(|(_, jars)| !jars.is_empty()).collect();

    if context.format() == OutputFormat::Csv {
        print_csv_row(&["owner", "module", "jar"]);
        for (module, jars) in &with_jars {
            for jar in *jars {
                print_csv_row(&[String::new(), module.to_string(), jar.clone()]);
            }
        }
        return Ok(());
    }

    if with_jars.is_empty() {
        println!("{}", "No jar resources found.".dimmed());
        return Ok(());
    }

    let total: usize = with_jars.iter().map(|(_, jars)| jars.len()).sum();
    println!(
        "{} jar files in {} modules:",
        total.to_string().green().bold(),
        with_jars.len().to_string().bold()
    );
    println!();

    for (module, jars) in &with_jars {
        println!("  {}", module.to_string().cyan());
        for jar in *jars {
            println!("    {} {jar}", "•".dimmed());
        }
    }

    Ok(())
}
