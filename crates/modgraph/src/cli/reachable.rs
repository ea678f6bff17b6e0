//! `modgraph reachable` command implementation.

use modgraph::{ModuleId, Result, breadth_first, depth_first};

use super::Context;
use super::display::print_search_tree;

/// Run the reachable command.
pub fn run(context: &Context, module: &ModuleId, bfs: bool) -> Result<()> {
    let graph = context.load_graph()?;

    let tree = if bfs {
        breadth_first(&graph, module)
    } else {
        depth_first(&graph, module)
    };

    print_search_tree(context.format(), &graph, &tree, "Modules reachable from");
    Ok(())
}
