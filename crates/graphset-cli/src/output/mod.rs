//! Output formatting for CLI commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use graphset_core::graph::model::GraphCollection;

use crate::OutputFormat;
use crate::document::Document;

/// Create a styled table with consistent formatting.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table
}

/// Add a header row to a table.
pub fn add_header(table: &mut Table, headers: &[&str]) {
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
}

/// Print a key-value table (for info displays).
pub fn print_key_value_table(items: &[(&str, String)], format: OutputFormat, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = items
                .iter()
                .map(|(k, v)| ((*k).to_string(), serde_json::Value::from(v.as_str())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Table => {
            let mut table = create_table();
            add_header(&mut table, &["Property", "Value"]);
            for (key, value) in items {
                table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

/// One row per graph: identifier, label, size and head properties.
pub fn heads_table(collection: &GraphCollection) -> Result<Table> {
    let mut table = create_table();
    add_header(&mut table, &["Graph", "Label", "Vertices", "Edges", "Properties"]);
    for graph in collection.graphs()? {
        let properties = graph
            .head()
            .properties
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(graph.id()).fg(Color::Green),
            Cell::new(&*graph.head().label),
            Cell::new(graph.vertex_count()),
            Cell::new(graph.edge_count()),
            Cell::new(properties),
        ]);
    }
    Ok(table)
}

/// Emits an operator result.
///
/// With `path` the document is written there. Otherwise JSON output prints
/// the document and table output prints one row per graph.
pub fn emit_collection(
    collection: &GraphCollection,
    path: Option<&Path>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let document = Document::from_collection(collection);
    if let Some(path) = path {
        document.write(path)?;
        success(
            &format!("Wrote {} graphs to {}", collection.len(), path.display()),
            quiet,
        );
        return Ok(());
    }
    if quiet {
        return Ok(());
    }
    match format {
        OutputFormat::Json => println!("{}", document.to_json()?),
        OutputFormat::Table => println!("{}", heads_table(collection)?),
    }
    Ok(())
}

/// Print a success message.
pub fn success(msg: &str, quiet: bool) {
    if !quiet {
        println!("✓ {msg}");
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("✗ {msg}");
}
