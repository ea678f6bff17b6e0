//! Common display utilities for CLI commands.

use std::borrow::Cow;

use colored::Colorize;
use modgraph::{Graph, ModuleId, OutputFormat, SearchTree};

const MAX_DISPLAY_ITEMS: usize = 50;

/// Join a module path as `a → b → c`.
pub fn format_path(path: &[ModuleId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Join a module path for a single CSV field.
pub fn csv_path(path: &[ModuleId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display a list of modules with bullet points.
///
/// Shows up to `MAX_DISPLAY_ITEMS` modules. If there are more, shows
/// "... and N more". If empty, shows the provided `empty_message`.
pub fn print_modules<'a>(modules: impl ExactSizeIterator<Item = &'a ModuleId>, empty_message: &str) {
    let total = modules.len();
    if total == 0 {
        println!("    {}", empty_message.dimmed());
        return;
    }

    for module in modules.take(MAX_DISPLAY_ITEMS) {
        println!("    {} {module}", "•".dimmed());
    }

    if total > MAX_DISPLAY_ITEMS {
        println!(
            "    {} ... and {} more",
            "•".dimmed(),
            total - MAX_DISPLAY_ITEMS
        );
    }
}

/// Quote a CSV field if it contains a separator, quote or line break.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Print one CSV record.
pub fn print_csv_row<S: AsRef<str>>(fields: &[S]) {
    let row: Vec<Cow<'_, str>> = fields.iter().map(|f| csv_field(f.as_ref())).collect();
    println!("{}", row.join(","));
}

/// Print the modules a search reached, excluding its root.
///
/// Text output lists them under `title`; CSV output has one
/// `module,parent` record per module.
pub fn print_search_tree(format: OutputFormat, graph: &Graph, tree: &SearchTree, title: &str) {
    let root = tree.root();
    let reached: Vec<&ModuleId> = tree.reached().filter(|module| *module != root).collect();

    match format {
        OutputFormat::Csv => {
            print_csv_row(&["module", "parent"]);
            for module in reached {
                let parent = tree.parent_of(module).map(ToString::to_string).unwrap_or_default();
                print_csv_row(&[module.to_string(), parent]);
            }
        }
        OutputFormat::Text => {
            if !graph.contains(root) {
                println!(
                    "{} {} has no module descriptor",
                    "note:".yellow().bold(),
                    root.to_string().cyan()
                );
            }
            println!(
                "{} {} ({}):",
                title.white().bold(),
                root.to_string().cyan().bold(),
                reached.len().to_string().green()
            );
            print_modules(reached.into_iter(), "(none)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("org.jboss.as.server:main", "org.jboss.as.server:main")]
    #[case::comma("a,b", "\"a,b\"")]
    #[case::quote("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case::newline("a\nb", "\"a\nb\"")]
    fn quotes_csv_fields(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(csv_field(input), expected);
    }

    #[test]
    fn formats_paths() {
        let path = [ModuleId::main("a"), ModuleId::new("b", "2")];
        assert_eq!(format_path(&path), "a:main → b:2");
        assert_eq!(csv_path(&path), "a:main b:2");
        assert_eq!(format_path(&[]), "");
    }
}
