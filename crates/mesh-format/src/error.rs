//! Error types for mesh decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using MeshError.
pub type MeshResult<T> = Result<T, MeshError>;

/// Structural problems with a mesh document.
///
/// Every variant is fatal for the document being decoded; no partially
/// populated grid is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("expected at least 4 records, found {found}")]
    MissingRecords { found: usize },

    #[error("bounds record must hold 4 values (x_min y_min x_max y_max), found {found}")]
    BoundsTokenCount { found: usize },

    #[error("shape record must hold 2 values (height width), found {found}")]
    ShapeTokenCount { found: usize },

    #[error("record {record}: '{token}' is not a valid {expected}")]
    InvalidNumber {
        record: usize,
        token: String,
        expected: &'static str,
    },

    #[error("grid dimensions must be positive, got {height}x{width}")]
    EmptyShape { height: usize, width: usize },

    #[error("grid shape {height}x{width} overflows the addressable value count")]
    ShapeOverflow { height: usize, width: usize },

    #[error("step label {label:?} cannot span records")]
    InvalidStep { label: String },

    #[error("invalid domain bounds [{x_min}, {x_max}) x [{y_min}, {y_max})")]
    InvalidBounds {
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    },

    #[error("field holds {actual} values but shape {height}x{width} requires {expected}")]
    ShapeMismatch {
        height: usize,
        width: usize,
        expected: usize,
        actual: usize,
    },
}

/// Primary error type for mesh file operations.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mesh {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl MeshError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }

    /// The structural error, if this failure came from parsing.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            MeshError::Format { source, .. } => Some(source),
            MeshError::Io { .. } => None,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, MeshError::Format { .. })
    }
}
