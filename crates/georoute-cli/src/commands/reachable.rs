//! Reachability command handler: every entity connected to a source.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use georoute_lib::{build_graph, reachable_from, EntityId, EntitySet};

use super::GraphArgs;
use crate::output::{style_text, write_json, OutputFormat, Palette};

/// Arguments for the reachable command.
#[derive(Args, Debug, Clone)]
pub struct ReachableCommandArgs {
    /// Entity to start from.
    #[arg(long = "from")]
    pub from: String,
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Entities reachable from a source, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachableReport {
    pub source: EntityId,
    pub reachable: Vec<EntityId>,
    pub unreachable: Vec<EntityId>,
}

impl ReachableReport {
    /// Compute the report for `args` over `entities`.
    pub fn compute(entities: &EntitySet, args: &ReachableCommandArgs) -> Result<Self> {
        let source = entities.resolve(&args.from)?;
        let graph = build_graph(entities, &args.graph.to_options());

        let order = reachable_from(&graph, source);
        let mut seen = vec![false; graph.len()];
        for &node in &order {
            seen[node] = true;
        }

        let id_of = |node: usize| graph.node_id(node).cloned().unwrap_or_default();
        Ok(Self {
            source: args.from.clone(),
            reachable: order.iter().map(|&node| id_of(node)).collect(),
            unreachable: (0..graph.len())
                .filter(|&node| !seen[node])
                .map(id_of)
                .collect(),
        })
    }

    fn render_text(&self, entities: &EntitySet) -> String {
        let name = |id: &str| {
            entities
                .get(id)
                .map(|e| e.display_name().to_string())
                .unwrap_or_else(|| id.to_string())
        };
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Reachable from {}: {} of {} entities",
            name(&self.source),
            self.reachable.len(),
            self.reachable.len() + self.unreachable.len()
        );
        for id in &self.reachable {
            let _ = writeln!(buffer, "- {} ({})", name(id), id);
        }
        for id in &self.unreachable {
            let _ = writeln!(buffer, "- {} ({}): unreachable", name(id), id);
        }
        buffer
    }
}

/// Handle the reachable subcommand.
pub fn handle_reachable_command<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    args: &ReachableCommandArgs,
    format: OutputFormat,
    palette: Palette,
) -> Result<()> {
    let report = ReachableReport::compute(entities, args)?;
    let written = match format {
        OutputFormat::Json => write_json(out, &report),
        OutputFormat::Text | OutputFormat::Rich => {
            write!(out, "{}", style_text(&report.render_text(entities), palette))
        }
    };
    written.context("failed to write reachability report")
}
