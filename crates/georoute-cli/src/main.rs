use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use georoute_cli::commands::distance::{handle_distance_command, DistanceCommandArgs};
use georoute_cli::commands::load_entity_set;
use georoute_cli::commands::mst::{handle_mst_command, MstCommandArgs};
use georoute_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs};
use georoute_cli::commands::reachable::{handle_reachable_command, ReachableCommandArgs};
use georoute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use georoute_cli::output::OutputFormat;
use georoute_cli::output::Palette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Geodesic routing over located entities")]
struct Cli {
    /// JSON file listing the entities to route between.
    #[arg(long, global = true, env = "GEOROUTE_ENTITIES", value_name = "FILE")]
    entities: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route (or a distance table) from one entity.
    Route(RouteCommandArgs),
    /// Build a minimum spanning tree over the entity graph.
    Mst(MstCommandArgs),
    /// List entities connected to a source under the distance threshold.
    Reachable(ReachableCommandArgs),
    /// Straight-line distance between two entities.
    Distance(DistanceCommandArgs),
    /// Rank entities by distance from a latitude/longitude.
    Nearest(NearestCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let path = cli
        .entities
        .as_deref()
        .context("no entity file given; pass --entities or set GEOROUTE_ENTITIES")?;
    let entities = load_entity_set(path)?;
    let palette = Palette::detect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Route(args) => handle_route_command(&mut out, &entities, args, cli.format, palette)?,
        Command::Mst(args) => handle_mst_command(&mut out, &entities, args, cli.format, palette)?,
        Command::Reachable(args) => {
            handle_reachable_command(&mut out, &entities, args, cli.format, palette)?
        }
        Command::Distance(args) => handle_distance_command(&mut out, &entities, args, cli.format)?,
        Command::Nearest(args) => {
            handle_nearest_command(&mut out, &entities, args, cli.format, palette)?
        }
    }
    out.flush().context("failed to flush output")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
