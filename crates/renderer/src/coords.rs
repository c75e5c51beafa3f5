//! Axis coordinates reconstructed from a grid's declared extent.
//!
//! Both projections consume the same [`AxisCoordinates`]: the surface uses
//! them directly, the heatmap's contour overlay maps them into pixel-index
//! space first.

use mesh_format::Grid;

/// Physical coordinates of each column (`x`) and row (`y`).
///
/// `x[i] = x_min + i * delta_x` for `i in 0..width`, so the sequence covers
/// `[x_min, x_max)` and always has exactly `width` entries; likewise for `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl AxisCoordinates {
    pub fn from_grid(grid: &Grid) -> Self {
        let bounds = grid.bounds();
        let delta_x = grid.delta_x();
        let delta_y = grid.delta_y();

        Self {
            x: arange(bounds.x_min, delta_x, grid.width()),
            y: arange(bounds.y_min, delta_y, grid.height()),
            delta_x,
            delta_y,
        }
    }

    /// Outer-product expansion into `(height, width)` coordinate matrices.
    pub fn meshgrid(&self) -> CoordinateMatrices {
        let cols = self.x.len();
        let rows = self.y.len();
        let mut x = Vec::with_capacity(rows * cols);
        let mut y = Vec::with_capacity(rows * cols);

        for &yv in &self.y {
            x.extend_from_slice(&self.x);
            y.extend(std::iter::repeat(yv).take(cols));
        }

        CoordinateMatrices { rows, cols, x, y }
    }
}

fn arange(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Row-major `X` and `Y` coordinate matrices of identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMatrices {
    pub rows: usize,
    pub cols: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CoordinateMatrices {
    /// Map the matrices into the heatmap's pixel-index space.
    ///
    /// Each matrix is divided by its step size, then shifted by its own
    /// `max + 1`. This is the fixed alignment convention contour overlays
    /// are drawn in; it is reproduced as-is rather than derived.
    pub fn to_pixel_index_space(&self, delta_x: f64, delta_y: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            x: rescale_and_shift(&self.x, delta_x),
            y: rescale_and_shift(&self.y, delta_y),
        }
    }

    /// Coordinates at a fractional `(col, row)` index, bilinearly
    /// interpolated between the surrounding matrix entries.
    pub fn sample(&self, col: f64, row: f64) -> (f64, f64) {
        (
            bilinear(&self.x, self.rows, self.cols, col, row),
            bilinear(&self.y, self.rows, self.cols, col, row),
        )
    }
}

fn rescale_and_shift(matrix: &[f64], delta: f64) -> Vec<f64> {
    let scaled: Vec<f64> = matrix.iter().map(|v| v / delta).collect();
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    scaled.into_iter().map(|v| v + max + 1.0).collect()
}

fn bilinear(matrix: &[f64], rows: usize, cols: usize, col: f64, row: f64) -> f64 {
    let col = col.clamp(0.0, (cols - 1) as f64);
    let row = row.clamp(0.0, (rows - 1) as f64);

    let c0 = col.floor() as usize;
    let r0 = row.floor() as usize;
    let c1 = (c0 + 1).min(cols - 1);
    let r1 = (r0 + 1).min(rows - 1);
    let tc = col - c0 as f64;
    let tr = row - r0 as f64;

    let top = matrix[r0 * cols + c0] * (1.0 - tc) + matrix[r0 * cols + c1] * tc;
    let bottom = matrix[r1 * cols + c0] * (1.0 - tc) + matrix[r1 * cols + c1] * tc;
    top * (1.0 - tr) + bottom * tr
}
