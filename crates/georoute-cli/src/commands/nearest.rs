//! Nearest command handler: entities ranked by distance from a location.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use georoute_lib::{rank_by_distance, Coordinate, EntitySet, RankedEntity};

use crate::output::{style_text, write_json, OutputFormat, Palette};

/// Arguments for the nearest command.
#[derive(Args, Debug, Clone)]
pub struct NearestCommandArgs {
    /// Latitude of the starting location, in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude of the starting location, in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
    /// Show at most this many entities.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestReport {
    pub origin: Coordinate,
    pub entities: Vec<RankedEntity>,
}

impl NearestReport {
    pub fn compute(entities: &EntitySet, args: &NearestCommandArgs) -> Result<Self> {
        let origin = Coordinate::new(args.lat, args.lng);
        let mut ranked = rank_by_distance(entities, origin)?;
        if let Some(limit) = args.limit {
            ranked.truncate(limit);
        }
        Ok(Self {
            origin,
            entities: ranked,
        })
    }

    fn render_text(&self, entities: &EntitySet) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Nearest to ({}, {}): {} entities",
            self.origin.latitude,
            self.origin.longitude,
            self.entities.len()
        );
        for ranked in &self.entities {
            let name = entities
                .get(&ranked.id)
                .map_or(ranked.id.as_str(), |e| e.display_name());
            let _ = match ranked.distance_km {
                Some(km) => writeln!(buffer, "- {} ({}): {:.1} km", name, ranked.id, km),
                None => writeln!(buffer, "- {} ({}): unreachable", name, ranked.id),
            };
        }
        buffer
    }
}

/// Handle the nearest subcommand.
pub fn handle_nearest_command<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    args: &NearestCommandArgs,
    format: OutputFormat,
    palette: Palette,
) -> Result<()> {
    let report = NearestReport::compute(entities, args)?;
    let written = match format {
        OutputFormat::Json => write_json(out, &report),
        OutputFormat::Text | OutputFormat::Rich => {
            write!(out, "{}", style_text(&report.render_text(entities), palette))
        }
    };
    written.context("failed to write nearest entities")
}
