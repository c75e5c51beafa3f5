//! Fixed-record mesh parser.
//!
//! A mesh document is four newline-separated records:
//!
//! ```text
//! <step label>
//! <x_min> <y_min> <x_max> <y_max>
//! <height> <width>
//! <height * width values, row-major>
//! ```
//!
//! The shape record is validated before the field record is materialized so
//! a corrupt file never produces a partially filled grid.

use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{FormatError, MeshError, MeshResult};
use crate::grid::{Bounds, Grid};

const STEP_RECORD: usize = 0;
const BOUNDS_RECORD: usize = 1;
const SHAPE_RECORD: usize = 2;
const FIELD_RECORD: usize = 3;

/// Read and decode a mesh file.
pub fn decode(path: impl AsRef<Path>) -> MeshResult<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| MeshError::io(path, e))?;
    let grid = decode_str(&content).map_err(|e| MeshError::format(path, e))?;

    debug!(
        path = %path.display(),
        step = grid.step(),
        height = grid.height(),
        width = grid.width(),
        "Decoded mesh"
    );

    Ok(grid)
}

/// Decode a mesh document held in memory.
pub fn decode_str(content: &str) -> Result<Grid, FormatError> {
    let records: Vec<&str> = content.split('\n').map(strip_cr).collect();
    if records.len() < 4 {
        return Err(FormatError::MissingRecords {
            found: records.len(),
        });
    }

    let step = records[STEP_RECORD];

    let bounds: Vec<f64> = parse_tokens(records[BOUNDS_RECORD], BOUNDS_RECORD, "float")?;
    if bounds.len() != 4 {
        return Err(FormatError::BoundsTokenCount {
            found: bounds.len(),
        });
    }
    let bounds = Bounds::new(bounds[0], bounds[1], bounds[2], bounds[3]);

    let shape: Vec<usize> = parse_tokens(records[SHAPE_RECORD], SHAPE_RECORD, "integer")?;
    if shape.len() != 2 {
        return Err(FormatError::ShapeTokenCount { found: shape.len() });
    }
    let (height, width) = (shape[0], shape[1]);

    let expected = width
        .checked_mul(height)
        .ok_or(FormatError::ShapeOverflow { height, width })?;
    let actual = records[FIELD_RECORD].split_whitespace().count();
    if actual != expected {
        return Err(FormatError::ShapeMismatch {
            height,
            width,
            expected,
            actual,
        });
    }

    let z: Vec<f64> = parse_tokens(records[FIELD_RECORD], FIELD_RECORD, "float")?;

    Grid::new(step, bounds, height, width, z)
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn parse_tokens<T: FromStr>(
    record: &str,
    index: usize,
    expected: &'static str,
) -> Result<Vec<T>, FormatError> {
    record
        .split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| FormatError::InvalidNumber {
                record: index,
                token: token.to_string(),
                expected,
            })
        })
        .collect()
}
