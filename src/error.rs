//! Error types for graph generation, validation and remote providers.

use std::time::Duration;
use thiserror::Error;

/// Raised when the generator breaks one of its own invariants. Never expected in practice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("connectivity repair found no candidate edge while {unreachable:?} remain unreachable")]
    RepairExhausted { unreachable: Vec<String> },
}

/// Why an externally supplied graph was rejected.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("could not parse graph: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("graph has no node `{0}`")]
    MissingNode(String),

    #[error("edge {from}-{to} references unknown node `{missing}`")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    #[error("edge connects `{0}` to itself")]
    SelfLoop(String),

    #[error("more than one edge connects `{0}` and `{1}`")]
    DuplicateEdge(String, String),

    #[error("node `{label}` has invalid coordinates ({x}, {y})")]
    InvalidCoordinate { label: String, x: f64, y: f64 },

    #[error("node `{label}` has invalid heuristic {h}")]
    InvalidHeuristic { label: String, h: f64 },

    #[error("edge {from}-{to} has invalid weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("nodes {0:?} cannot be reached from the start")]
    Disconnected(Vec<String>),

    #[error("heuristic of `{label}` is {h} but the goal is only {cost} away")]
    InadmissibleHeuristic { label: String, h: u32, cost: u32 },
}

/// Failure of a remote graph provider. Every variant leads to local generation.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("provider returned a malformed graph: {0}")]
    Malformed(#[from] GraphError),
}
