use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Stable identifier for a located entity.
pub type EntityId = String;

/// Minimum Jaro-Winkler similarity for an identifier to be offered as a
/// suggestion when lookup fails.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A located point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Missing coordinates are allowed; such entities are kept as isolated
    /// graph nodes.
    #[serde(rename = "location", default)]
    pub coordinate: Option<Coordinate>,
}

impl Entity {
    /// Convenience constructor for an entity with a coordinate and no name.
    pub fn new(id: impl Into<EntityId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            coordinate: Some(Coordinate::new(latitude, longitude)),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Coordinate if present and geographically valid.
    pub fn valid_coordinate(&self) -> Option<Coordinate> {
        self.coordinate.filter(Coordinate::is_valid)
    }

    /// Name when present, otherwise the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Ordered collection of entities with unique identifiers.
///
/// Insertion order is significant: it fixes node indices in graphs built from
/// the set and the default root of spanning trees.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl EntitySet {
    /// Build a set, rejecting duplicate identifiers.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            if index.insert(entity.id.clone(), position).is_some() {
                return Err(Error::DuplicateEntity {
                    id: entity.id.clone(),
                });
            }
        }
        Ok(Self { entities, index })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.index_of(id).map(|position| &self.entities[position])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn by_index(&self, position: usize) -> Option<&Entity> {
        self.entities.get(position)
    }

    /// Resolve an identifier to its position, attaching fuzzy suggestions to
    /// the error when it is unknown.
    pub fn resolve(&self, id: &str) -> Result<usize> {
        self.index_of(id).ok_or_else(|| Error::UnknownEntity {
            id: id.to_string(),
            suggestions: self.fuzzy_matches(id, 3),
        })
    }

    /// Identifiers (or names) similar to `query`, best match first.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .entities
            .iter()
            .map(|entity| {
                let id_score = strsim::jaro_winkler(&needle, &entity.id.to_lowercase());
                let name_score = entity
                    .name
                    .as_deref()
                    .map(|name| strsim::jaro_winkler(&needle, &name.to_lowercase()))
                    .unwrap_or(0.0);
                (id_score.max(name_score), entity.id.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

/// Accepted shapes for an entity file: a bare array, or an object wrapping
/// the array under `entities` or `hotels`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityDocument {
    List(Vec<Entity>),
    Wrapped {
        #[serde(alias = "hotels")]
        entities: Vec<Entity>,
    },
}

/// Parse an entity set from a JSON string.
pub fn parse_entities(json: &str) -> Result<EntitySet> {
    let document: EntityDocument = serde_json::from_str(json)?;
    into_set(document)
}

/// Load an entity set from a JSON file on disk.
pub fn load_entities(path: &Path) -> Result<EntitySet> {
    let raw = fs::read_to_string(path)?;
    let document: EntityDocument =
        serde_json::from_str(&raw).map_err(|source| Error::EntityFile {
            path: path.to_path_buf(),
            source,
        })?;
    let set = into_set(document)?;
    debug!(path = %path.display(), entities = set.len(), "loaded entity file");
    Ok(set)
}

fn into_set(document: EntityDocument) -> Result<EntitySet> {
    let entities = match document {
        EntityDocument::List(entities) => entities,
        EntityDocument::Wrapped { entities } => entities,
    };
    EntitySet::new(entities)
}

/// Identifiers arrive as strings or plain numbers; both normalise to a string.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
