//! Spanning tree command handler.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use georoute_lib::{plan_route, EntitySet, RouteRequest};

use super::GraphArgs;
use crate::output::{write_plan, OutputFormat, Palette};

/// Arguments for the mst command.
#[derive(Args, Debug, Clone, Default)]
pub struct MstCommandArgs {
    /// Entity the tree grows from (first entity in the file by default).
    #[arg(long)]
    pub root: Option<String>,
    #[command(flatten)]
    pub graph: GraphArgs,
}

impl MstCommandArgs {
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::spanning_tree().with_graph_options(self.graph.to_options());
        request.source = self.root.clone();
        request
    }
}

/// Handle the mst subcommand.
pub fn handle_mst_command<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    args: &MstCommandArgs,
    format: OutputFormat,
    palette: Palette,
) -> Result<()> {
    let plan = plan_route(entities, &args.to_request())?;
    write_plan(out, entities, &plan, format, palette).context("failed to write spanning tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use georoute_lib::RouteAlgorithm;

    #[test]
    fn request_uses_graph_flags_and_root() {
        let args = MstCommandArgs {
            root: Some("x".into()),
            graph: GraphArgs::default(),
        };
        let request = args.to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::Prim);
        assert_eq!(request.source.as_deref(), Some("x"));
        assert_eq!(request.graph.max_distance_km, Some(50.0));
    }
}
