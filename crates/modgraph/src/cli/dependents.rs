//! `modgraph dependents` command implementation.

use modgraph::{ModuleId, Result, breadth_first};

use super::Context;
use super::display::print_search_tree;

/// Run the dependents command.
///
/// Searches the reversed graph, so each module's parent is a module it is
/// needed by.
pub fn run(context: &Context, module: &ModuleId) -> Result<()> {
    let graph = context.load_graph()?;
    let reverse = graph.reverse();

    let tree = breadth_first(&reverse, module);

    print_search_tree(context.format(), &graph, &tree, "Modules depending on");
    Ok(())
}
