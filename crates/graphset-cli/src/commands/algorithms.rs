//! Algorithm listing command.

use anyhow::Result;
use comfy_table::{Cell, Color};
use graphset_adapters::plugins::AlgorithmRegistry;
use serde::Serialize;

use crate::OutputFormat;
use crate::commands::Context;
use crate::output;

/// A registered algorithm.
#[derive(Serialize)]
struct AlgorithmOutput {
    name: String,
    kind: &'static str,
    description: String,
    parameters: Vec<ParameterOutput>,
}

/// A declared parameter.
#[derive(Serialize)]
struct ParameterOutput {
    name: String,
    #[serde(rename = "type")]
    param_type: String,
    required: bool,
}

/// Run the algorithms command.
pub fn run(ctx: &Context) -> Result<()> {
    let registry = AlgorithmRegistry::global();
    let algorithms: Vec<AlgorithmOutput> = registry
        .iter()
        .map(|a| AlgorithmOutput {
            name: a.name().to_string(),
            kind: a.kind(),
            description: a.description().to_string(),
            parameters: a
                .parameters()
                .iter()
                .map(|p| ParameterOutput {
                    name: p.name.clone(),
                    param_type: format!("{:?}", p.param_type),
                    required: p.required,
                })
                .collect(),
        })
        .collect();

    if ctx.quiet {
        return Ok(());
    }
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&algorithms)?),
        OutputFormat::Table => {
            let mut table = output::create_table();
            output::add_header(&mut table, &["Name", "Kind", "Parameters", "Description"]);
            for algorithm in &algorithms {
                let params = algorithm
                    .parameters
                    .iter()
                    .map(|p| {
                        let marker = if p.required { "" } else { "?" };
                        format!("{}{marker}: {}", p.name, p.param_type)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    Cell::new(&algorithm.name).fg(Color::Green),
                    Cell::new(algorithm.kind),
                    Cell::new(if params.is_empty() { "-".to_string() } else { params }),
                    Cell::new(&algorithm.description),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
