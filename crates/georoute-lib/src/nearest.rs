//! Ranking entities by distance from an arbitrary location.
//!
//! The origin is not an entity, so no graph is built: every located entity
//! is one direct hop away and its shortest distance is the haversine
//! distance itself.

use serde::Serialize;
use tracing::debug;

use crate::entity::{EntityId, EntitySet};
use crate::error::{Error, Result};
use crate::geo::{haversine_km, Coordinate};

/// One entity and its distance from the ranking origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntity {
    pub id: EntityId,
    /// `None` when the entity has no valid coordinate.
    pub distance_km: Option<f64>,
}

impl RankedEntity {
    pub fn is_reachable(&self) -> bool {
        self.distance_km.is_some()
    }
}

/// Every entity ordered by ascending distance from `origin`.
///
/// Entities without a valid coordinate are unreachable and sort last. Ties
/// keep the entity set's order.
pub fn rank_by_distance(entities: &EntitySet, origin: Coordinate) -> Result<Vec<RankedEntity>> {
    if !origin.is_valid() {
        return Err(Error::InvalidCoordinate {
            latitude: origin.latitude,
            longitude: origin.longitude,
        });
    }

    let mut ranked: Vec<RankedEntity> = entities
        .iter()
        .map(|entity| RankedEntity {
            id: entity.id.clone(),
            distance_km: entity
                .valid_coordinate()
                .map(|coordinate| haversine_km(origin, coordinate)),
        })
        .collect();

    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    debug!(
        origin = ?origin,
        reachable = ranked.iter().filter(|r| r.is_reachable()).count(),
        total = ranked.len(),
        "ranked entities by distance"
    );

    Ok(ranked)
}
