//! Distinct command.

use std::path::Path;

use anyhow::Result;

use crate::commands::Context;
use crate::document;
use crate::output;

/// Run the distinct command.
pub fn run(input: &Path, out: Option<&Path>, ctx: &Context) -> Result<()> {
    let collection = document::load(input)?;
    let engine = ctx.engine()?;
    let unique = engine.distinct(&collection)?;
    tracing::info!(
        input = collection.len(),
        output = unique.len(),
        "removed isomorphic duplicates"
    );
    output::emit_collection(&unique, out, ctx.format, ctx.quiet)
}
