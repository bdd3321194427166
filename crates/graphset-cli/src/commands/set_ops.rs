//! Union, intersect and difference commands.

use anyhow::Result;

use crate::SetOpArgs;
use crate::commands::Context;
use crate::document;
use crate::output;

/// A binary set operator.
#[derive(Debug, Clone, Copy)]
pub enum SetOp {
    Union,
    Intersect,
    Difference,
}

/// Run a set operator command.
pub fn run(op: SetOp, args: &SetOpArgs, ctx: &Context) -> Result<()> {
    let left = document::load(&args.left)?;
    let right = document::load(&args.right)?;
    let engine = ctx.engine()?;
    let result = match op {
        SetOp::Union => engine.union(&left, &right)?,
        SetOp::Intersect => engine.intersect(&left, &right)?,
        SetOp::Difference => engine.difference(&left, &right)?,
    };
    output::emit_collection(&result, args.output.as_deref(), ctx.format, ctx.quiet)
}
