//! Prerequisite graph command handler

use super::{read_input, to_json};
use dars_audit::core::prereq_graph::{build_prereq_graph, PrereqExpr};
use dars_audit::debug;
use std::path::Path;

/// Run the prereq command.
///
/// The input file holds one prerequisite expression, or `null` for a course without
/// prerequisites.
pub fn run(input_file: &Path, course: &str, compact: bool) -> Result<(), String> {
    let json = read_input(input_file)?;
    let expr: Option<PrereqExpr> = serde_json::from_str(&json).map_err(|e| {
        format!(
            "✗ {} is not a prerequisite expression: {e}",
            input_file.display()
        )
    })?;

    let graph = build_prereq_graph(course, expr.as_ref());
    debug!(
        "Prerequisite graph for {course}: {} nodes, {} links",
        graph.nodes.len(),
        graph.links.len()
    );
    println!("{}", to_json(&graph, compact)?);
    Ok(())
}
