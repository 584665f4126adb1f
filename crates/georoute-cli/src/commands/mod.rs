//! Command handlers for the CLI subcommands.
//!
//! Each module handles one subcommand; `main.rs` only parses arguments and
//! dispatches here.

pub mod distance;
pub mod mst;
pub mod nearest;
pub mod reachable;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use georoute_lib::{load_entities, EntitySet, GraphBuildOptions, TravelMode};

/// Graph construction flags shared by every graph-based command.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GraphArgs {
    /// Longest edge kept, in kilometres (default 50).
    #[arg(long = "max-distance", value_name = "KM")]
    pub max_distance: Option<f64>,
    /// Link every pair of entities regardless of distance.
    #[arg(long, conflicts_with = "max_distance")]
    pub unbounded: bool,
    /// Weight edges by travel time for this mode (car, bus, bike).
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,
}

impl GraphArgs {
    /// Translate the flags into library graph options.
    pub fn to_options(&self) -> GraphBuildOptions {
        let mut options = if self.unbounded {
            GraphBuildOptions::unbounded()
        } else {
            GraphBuildOptions::default()
        };
        if let Some(km) = self.max_distance {
            options = options.with_max_distance(km);
        }
        if let Some(mode) = self.mode.as_deref() {
            options = options.with_travel_mode(TravelMode::from_name(mode));
        }
        options
    }
}

/// Load the entity file named on the command line.
pub fn load_entity_set(path: &Path) -> Result<EntitySet> {
    load_entities(path)
        .with_context(|| format!("failed to load entities from {}", path.display()))
}
