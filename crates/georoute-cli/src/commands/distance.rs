//! Straight-line distance between two entities.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use serde::Serialize;

use georoute_lib::{haversine_km, EntityId, EntitySet, TravelMode};

use crate::output::{write_json, OutputFormat};

/// Arguments for the distance command.
#[derive(Args, Debug, Clone)]
pub struct DistanceCommandArgs {
    #[arg(long = "from")]
    pub from: String,
    #[arg(long = "to")]
    pub to: String,
    /// Also report travel time for this mode (car, bus, bike).
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDistance {
    pub from: EntityId,
    pub to: EntityId,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TravelMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

impl PairDistance {
    pub fn compute(entities: &EntitySet, args: &DistanceCommandArgs) -> Result<Self> {
        let coordinate = |id: &str| -> Result<_> {
            let position = entities.resolve(id)?;
            entities
                .by_index(position)
                .and_then(|entity| entity.valid_coordinate())
                .ok_or_else(|| anyhow!("entity {id} has no valid location"))
        };
        let distance_km = haversine_km(coordinate(&args.from)?, coordinate(&args.to)?);
        let mode = args.mode.as_deref().map(TravelMode::from_name);
        Ok(Self {
            from: args.from.clone(),
            to: args.to.clone(),
            distance_km,
            mode,
            hours: mode.map(|m| distance_km / m.speed_kmh()),
        })
    }
}

/// Handle the distance subcommand.
pub fn handle_distance_command<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    args: &DistanceCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let pair = PairDistance::compute(entities, args)?;
    let written = match format {
        OutputFormat::Json => write_json(out, &pair),
        OutputFormat::Text | OutputFormat::Rich => match (pair.mode, pair.hours) {
            (Some(mode), Some(hours)) => writeln!(
                out,
                "{} -> {}: {:.1} km ({:.2} h by {})",
                pair.from, pair.to, pair.distance_km, hours, mode
            ),
            _ => writeln!(out, "{} -> {}: {:.1} km", pair.from, pair.to, pair.distance_km),
        },
    };
    written.context("failed to write distance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use georoute_lib::Entity;

    fn entities() -> EntitySet {
        let mut lost = Entity::new("lost", 0.0, 0.0);
        lost.coordinate = None;
        EntitySet::new(vec![
            Entity::new("a", 0.0, 0.0),
            Entity::new("b", 0.0, 1.0),
            lost,
        ])
        .unwrap()
    }

    #[test]
    fn distance_with_mode_reports_hours() {
        let args = DistanceCommandArgs {
            from: "a".into(),
            to: "b".into(),
            mode: Some("bike".into()),
        };
        let pair = PairDistance::compute(&entities(), &args).unwrap();
        assert!((pair.distance_km - 111.195).abs() < 0.01);
        assert!((pair.hours.unwrap() - pair.distance_km / 20.0).abs() < 1e-12);
    }

    #[test]
    fn missing_location_is_an_error() {
        let args = DistanceCommandArgs {
            from: "a".into(),
            to: "lost".into(),
            mode: None,
        };
        let err = PairDistance::compute(&entities(), &args).unwrap_err();
        assert!(err.to_string().contains("no valid location"));
    }
}
