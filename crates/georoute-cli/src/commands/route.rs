//! Route command handler for computing paths between entities.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use georoute_lib::{plan_route, AStarOptions, EntitySet, RouteAlgorithm, RouteRequest};

use super::GraphArgs;
use crate::output::{write_plan, OutputFormat, Palette};

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting entity id.
    #[arg(long = "from")]
    pub from: String,
    /// Destination entity id. Dijkstra and Bellman-Ford print every distance
    /// from the source when omitted.
    #[arg(long = "to")]
    pub to: Option<String>,
    /// Algorithm to use: bfs, dijkstra, bellman-ford, a-star.
    #[arg(long, default_value_t = RouteAlgorithm::Dijkstra)]
    pub algorithm: RouteAlgorithm,
    /// Give up an A* search after this many expansions.
    #[arg(long = "max-iterations", value_name = "N")]
    pub max_iterations: Option<usize>,
    #[command(flatten)]
    pub graph: GraphArgs,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(self.algorithm, self.from.clone())
            .with_graph_options(self.graph.to_options())
            .with_a_star(AStarOptions {
                max_iterations: self.max_iterations,
            });
        if let Some(to) = &self.to {
            request = request.to(to.clone());
        }
        request
    }
}

/// Handle the route subcommand.
pub fn handle_route_command<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    args: &RouteCommandArgs,
    format: OutputFormat,
    palette: Palette,
) -> Result<()> {
    if args.algorithm.is_tree() {
        anyhow::bail!("use the `mst` command for spanning trees");
    }
    let plan = plan_route(entities, &args.to_request())?;
    write_plan(out, entities, &plan, format, palette).context("failed to write route")
}

#[cfg(test)]
mod tests {
    use super::*;
    use georoute_lib::Entity;

    fn args(to: Option<&str>, algorithm: RouteAlgorithm) -> RouteCommandArgs {
        RouteCommandArgs {
            from: "a".into(),
            to: to.map(str::to_string),
            algorithm,
            max_iterations: None,
            graph: GraphArgs::default(),
        }
    }

    fn entities() -> EntitySet {
        EntitySet::new(vec![
            Entity::new("a", 0.0, 0.0).with_name("Alpha"),
            Entity::new("b", 0.0, 0.1).with_name("Bravo"),
        ])
        .unwrap()
    }

    #[test]
    fn request_carries_target_and_ceiling() {
        let mut route = args(Some("b"), RouteAlgorithm::AStar);
        route.max_iterations = Some(10);
        let request = route.to_request();
        assert_eq!(request.target.as_deref(), Some("b"));
        assert_eq!(request.a_star.max_iterations, Some(10));
    }

    #[test]
    fn text_route_is_written() {
        let mut buffer = Vec::new();
        handle_route_command(
            &mut buffer,
            &entities(),
            &args(Some("b"), RouteAlgorithm::Bfs),
            OutputFormat::Text,
            Palette::PLAIN,
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Route: Alpha -> Bravo (1 hops, algorithm: bfs)"));
    }

    #[test]
    fn prim_is_rejected() {
        let mut buffer = Vec::new();
        let err = handle_route_command(
            &mut buffer,
            &entities(),
            &args(None, RouteAlgorithm::Prim),
            OutputFormat::Text,
            Palette::PLAIN,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mst"));
    }
}
