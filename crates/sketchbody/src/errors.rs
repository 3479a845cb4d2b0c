use thiserror::Error;

use crate::body::ID;

/// Precondition violations raised by geometry construction and world lookups.
///
/// Simulation itself never fails: numeric setters clamp and unknown names fall
/// back to defaults.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("cannot normalize a zero length vector")]
    DegenerateVector,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon edge {index} has zero length")]
    DegenerateEdge { index: usize },
    #[error("{vertices} vertices but {normals} edge normals")]
    EdgeCountMismatch { vertices: usize, normals: usize },
    #[error("body {0} does not exist")]
    BodyNotFound(ID),
}

pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;
