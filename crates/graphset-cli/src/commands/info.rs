//! Collection info command.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::OutputFormat;
use crate::commands::Context;
use crate::document;
use crate::output;

/// Information about a collection.
#[derive(Serialize)]
struct CollectionInfoOutput {
    graph_count: usize,
    vertex_count: usize,
    edge_count: usize,
    shared_vertex_count: usize,
    vertex_labels: Vec<String>,
    edge_labels: Vec<String>,
}

/// Run the info command.
pub fn run(path: &Path, ctx: &Context) -> Result<()> {
    let collection = document::load(path)?;

    let output = CollectionInfoOutput {
        graph_count: collection.len(),
        vertex_count: collection.vertex_count(),
        edge_count: collection.edge_count(),
        shared_vertex_count: collection
            .vertices()
            .filter(|v| v.graph_ids.len() > 1)
            .count(),
        vertex_labels: collection
            .vertices()
            .map(|v| v.label.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        edge_labels: collection
            .edges()
            .map(|e| e.label.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    match ctx.format {
        OutputFormat::Json => {
            if !ctx.quiet {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        OutputFormat::Table => {
            let items = vec![
                ("Graphs", output.graph_count.to_string()),
                ("Vertices", output.vertex_count.to_string()),
                ("Edges", output.edge_count.to_string()),
                ("Shared vertices", output.shared_vertex_count.to_string()),
                ("Vertex labels", output.vertex_labels.join(", ")),
                ("Edge labels", output.edge_labels.join(", ")),
            ];
            output::print_key_value_table(&items, ctx.format, ctx.quiet)?;
        }
    }

    Ok(())
}
