//! Collection validation command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::OutputFormat;
use crate::commands::Context;
use crate::document::Document;
use crate::output;

/// Validation result output.
#[derive(Serialize)]
struct ValidationOutput {
    valid: bool,
    graph_count: usize,
    error: Option<String>,
}

/// Run the validate command.
///
/// Exits with status 1 if the collection breaks an invariant.
pub fn run(path: &Path, ctx: &Context) -> Result<()> {
    let document = Document::read(path)?;
    let graph_count = document.heads.len();
    let checked = document
        .into_collection()
        .and_then(|c| c.validate().map_err(anyhow::Error::from));

    let output = ValidationOutput {
        valid: checked.is_ok(),
        graph_count,
        error: checked.err().map(|e| e.to_string()),
    };

    match ctx.format {
        OutputFormat::Json => {
            if !ctx.quiet {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        OutputFormat::Table => match &output.error {
            None => output::success(
                &format!("Collection is valid ({} graphs)", output.graph_count),
                ctx.quiet,
            ),
            Some(error) => output::error(&format!("Collection is invalid: {error}")),
        },
    }

    // Return error exit code if validation failed
    if !output.valid {
        std::process::exit(1);
    }

    Ok(())
}
