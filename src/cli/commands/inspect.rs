//! Inspect command handler

use super::resolve_input;
use relgraph::config::Config;
use relgraph::core::graph::RelationGraph;
use relgraph::core::loader::load_sheet;
use std::path::Path;

/// Print what was read from a spreadsheet and how it becomes a graph
///
/// # Errors
/// Returns a printable `✗` message if the spreadsheet cannot be loaded
pub fn run(input: Option<&Path>, config: &Config) -> Result<(), String> {
    let input = resolve_input(input, config);
    let sheet = load_sheet(&input)
        .map_err(|e| format!("✗ Failed to load {}: {e}", input.display()))?;
    let graph = RelationGraph::build(&sheet);

    println!("\n=== {} ===\n", input.display());
    println!("{sheet}");
    print!("{graph}");
    Ok(())
}
