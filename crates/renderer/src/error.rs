//! Error types for field rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failures raised while rasterizing, encoding or saving an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("field value at row {row}, column {col} is not finite")]
    NonFiniteValue { row: usize, col: usize },

    #[error("surface needs at least 2 rows and 2 columns, grid is {height}x{width}")]
    DegenerateSurface { height: usize, width: usize },

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("chart has no data points")]
    EmptyChart,

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),

    #[error("invalid style: {0}")]
    Style(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Style(format!("JSON error: {}", err))
    }
}
