use std::path::PathBuf;

use thiserror::Error;

use crate::entity::EntityId;
use crate::routing::RouteAlgorithm;

/// Convenient result alias for the georoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only caller contract violations surface here. Unreachable targets,
/// disconnected graphs and negative cycles are ordinary outcomes and are
/// reported through [`crate::RouteOutcome`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an entity identifier could not be found in the entity set.
    #[error("unknown entity id: {id}{}", format_suggestions(.suggestions))]
    UnknownEntity {
        id: EntityId,
        suggestions: Vec<String>,
    },

    /// Raised when two entities share the same identifier.
    #[error("duplicate entity id: {id}")]
    DuplicateEntity { id: EntityId },

    /// Raised when a query needs at least one entity but none were supplied.
    #[error("entity set is empty")]
    EmptyEntitySet,

    /// Raised when the selected algorithm needs an endpoint the request omitted.
    #[error("algorithm {algorithm} requires a {role} entity")]
    MissingEndpoint {
        role: &'static str,
        algorithm: RouteAlgorithm,
    },

    /// Raised when a query origin lies outside geographic range or is not
    /// finite.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when a graph assembled from raw parts references a node that
    /// does not exist.
    #[error("edge {from} -> {to} references an unknown node")]
    DanglingEdge { from: EntityId, to: EntityId },

    /// Raised when an entity file could not be parsed.
    #[error("failed to parse entity file {}: {source}", .path.display())]
    EntityFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for JSON errors outside of file loading.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entity_without_suggestions() {
        let err = Error::UnknownEntity {
            id: "h-9".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown entity id: h-9");
    }

    #[test]
    fn unknown_entity_lists_suggestions() {
        let err = Error::UnknownEntity {
            id: "Grand Hotl".to_string(),
            suggestions: vec!["Grand Hotel".to_string(), "Grand Hostel".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown entity id: Grand Hotl. Did you mean one of: 'Grand Hotel', 'Grand Hostel'?"
        );
    }

    #[test]
    fn missing_endpoint_names_algorithm() {
        let err = Error::MissingEndpoint {
            role: "target",
            algorithm: RouteAlgorithm::AStar,
        };
        assert_eq!(err.to_string(), "algorithm a-star requires a target entity");
    }

    #[test]
    fn invalid_coordinate_shows_both_components() {
        let err = Error::InvalidCoordinate {
            latitude: 91.5,
            longitude: 2.0,
        };
        assert_eq!(err.to_string(), "invalid coordinate (91.5, 2)");
    }
}
