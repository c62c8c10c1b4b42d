use thiserror::Error;

use crate::graph::IntersectionId;

/// Convenient result alias for the campus routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a query or connection references an intersection that is
    /// not part of the graph.
    #[error("unknown intersection id: {id}")]
    UnknownIntersection { id: IntersectionId },

    /// Raised when a building code could not be found in the graph.
    #[error("unknown building code: {code}{}", format_suggestions(.suggestions))]
    UnknownBuilding {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a category string falls outside the controlled vocabulary.
    #[error("unknown category: {value}")]
    UnknownCategory { value: String },

    /// Raised when two intersection records share an identifier.
    #[error("duplicate intersection id: {id}")]
    DuplicateIntersection { id: IntersectionId },

    /// Raised when two building records share a code.
    #[error("duplicate building code: {code}")]
    DuplicateBuilding { code: String },

    /// Raised when a connection joins an intersection to itself.
    #[error("connection from intersection {id} to itself")]
    SelfLoop { id: IntersectionId },

    /// Raised when buildings are supplied but there is no intersection to bind them to.
    #[error("cannot place buildings on a graph without intersections")]
    NoIntersections,

    /// Raised when extracting from an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Raised when re-prioritising a payload that is not queued.
    #[error("payload not present in priority queue")]
    PayloadNotFound,

    /// Raised when no route could be found between two buildings.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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
