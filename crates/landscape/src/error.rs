//! Error types for landscape sampling.

use mesh_format::{FormatError, MeshError};
use thiserror::Error;

/// Result type alias using LandscapeError.
pub type LandscapeResult<T> = Result<T, LandscapeError>;

#[derive(Debug, Error)]
pub enum LandscapeError {
    #[error("invalid projection: {0}")]
    InvalidProjection(#[from] FormatError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("unknown benchmark '{0}' (expected one of: sphere, rastrigin, ackley, griewank, dropwave)")]
    UnknownBenchmark(String),
}
