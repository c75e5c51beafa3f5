//! Mesh writer producing the layout `decode` consumes.

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::grid::Grid;

/// Serialize a grid into mesh text.
///
/// Every field value is followed by a single space and the document has no
/// trailing newline, matching the files written by the optimizer.
pub fn encode(grid: &Grid) -> String {
    let bounds = grid.bounds();
    // Rough guess at ~12 characters per value.
    let mut out = String::with_capacity(64 + grid.values().len() * 12);

    out.push_str(grid.step());
    out.push('\n');
    let _ = writeln!(
        out,
        "{} {} {} {}",
        bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max
    );
    let _ = writeln!(out, "{} {}", grid.height(), grid.width());
    for value in grid.values() {
        let _ = write!(out, "{} ", value);
    }

    out
}

/// Write a grid to disk in mesh format.
pub fn write(grid: &Grid, path: impl AsRef<Path>) -> MeshResult<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(grid)).map_err(|e| MeshError::io(path, e))?;
    debug!(
        path = %path.display(),
        step = grid.step(),
        height = grid.height(),
        width = grid.width(),
        "Wrote mesh"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_str;
    use crate::grid::Bounds;

    #[test]
    fn test_encode_layout() {
        let grid = Grid::new("3", Bounds::new(-1.5, 0.0, 1.5, 2.0), 1, 2, vec![0.25, -4.0]).unwrap();
        assert_eq!(encode(&grid), "3\n-1.5 0 1.5 2\n1 2\n0.25 -4 ");
    }

    #[test]
    fn test_encoded_text_decodes_to_same_grid() {
        let z: Vec<f64> = (0..12).map(|i| (i as f64).sin() * 1e3 / 7.0).collect();
        let grid = Grid::new("11", Bounds::new(-5.12, -5.12, 5.12, 5.12), 3, 4, z).unwrap();
        assert_eq!(decode_str(&encode(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_labels_that_would_break_records_never_reach_encode() {
        let bounds = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(Grid::new("run\n2", bounds, 1, 1, vec![0.0]).is_err());
        assert!(Grid::new("7\r", bounds, 1, 1, vec![0.0]).is_err());

        let grid = Grid::new("run 2", bounds, 1, 1, vec![0.0]).unwrap();
        assert_eq!(decode_str(&encode(&grid)).unwrap(), grid);
    }
}
