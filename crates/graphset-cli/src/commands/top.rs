//! Top command.

use std::path::Path;

use anyhow::Result;
use graphset_engine::SortOrder;

use crate::Order;
use crate::commands::Context;
use crate::document;
use crate::output;

/// Run the top command. Without a key, collection order is kept.
pub fn run(
    input: &Path,
    n: i64,
    key: Option<&str>,
    order: Order,
    out: Option<&Path>,
    ctx: &Context,
) -> Result<()> {
    let collection = document::load(input)?;
    let engine = ctx.engine()?;
    let result = match key {
        Some(key) => engine.top_by(&collection, key, sort_order(order), n)?,
        None => engine.top(&collection, n)?,
    };
    output::emit_collection(&result, out, ctx.format, ctx.quiet)
}

fn sort_order(order: Order) -> SortOrder {
    match order {
        Order::Asc => SortOrder::Ascending,
        Order::Desc => SortOrder::Descending,
    }
}
