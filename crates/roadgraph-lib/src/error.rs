use thiserror::Error;

use crate::graph::NodeId;
use crate::routing::Endpoint;

/// Convenient result alias for the road graph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an edge references a coordinate that was never added as a vertex.
    #[error("no vertex exists at {location}")]
    UnknownVertex { location: String },

    /// Raised when an edge length is negative or not a finite number.
    #[error("invalid road segment length {length}; expected a finite value >= 0")]
    InvalidLength { length: f64 },

    /// Raised when asking an edge for the endpoint opposite a node it does not touch.
    #[error("node {node} is not an endpoint of edge {start} -> {end}")]
    NotAnEndpoint {
        node: NodeId,
        start: NodeId,
        end: NodeId,
    },

    /// Raised when the parent map cannot be walked back from the goal to the start.
    #[error("parent map is corrupt: no way back to the start from {at}")]
    CorruptPath { at: String },

    /// Raised when a route request is missing its start or goal.
    #[error("route request has no {endpoint} location")]
    MissingEndpoint { endpoint: Endpoint },

    /// Raised when the A* reference speed cannot produce a meaningful estimate.
    #[error("invalid heuristic reference speed {speed}; expected a finite value > 0")]
    InvalidReferenceSpeed { speed: f64 },

    /// Raised when a coordinate string cannot be parsed.
    #[error("invalid location '{input}'; expected '<latitude>,<longitude>'")]
    InvalidLocation { input: String },

    /// Raised when a road map line is malformed.
    #[error("road map line {line}: {message}")]
    MapParse { line: usize, message: String },

    /// Raised when consecutive route waypoints are not joined by any road segment.
    #[error("no road segment from {from} to {to}")]
    MissingSegment { from: String, to: String },

    /// Raised when a computed route plan lacks any waypoints.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
