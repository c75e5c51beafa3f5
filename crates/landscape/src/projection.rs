//! 2D projections of a loss function onto a regular mesh.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use mesh_format::{Bounds, FormatError, Grid};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::LandscapeResult;
use crate::objective::Objective;

/// Samples an objective over a `width x height` mesh covering `bounds`.
///
/// Cell `(x, y)` holds `f(x_min + x * dx, y_min + y * dy)`, so the mesh
/// covers `[x_min, x_max) x [y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossProjection {
    width: usize,
    height: usize,
    bounds: Bounds,
}

impl LossProjection {
    pub fn new(width: usize, height: usize, bounds: Bounds) -> LandscapeResult<Self> {
        if width == 0 || height == 0 {
            return Err(FormatError::EmptyShape { height, width }.into());
        }
        if !bounds.is_valid() {
            return Err(FormatError::InvalidBounds {
                x_min: bounds.x_min,
                y_min: bounds.y_min,
                x_max: bounds.x_max,
                y_max: bounds.y_max,
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            bounds,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn delta_x(&self) -> f64 {
        self.bounds.width() / self.width as f64
    }

    pub fn delta_y(&self) -> f64 {
        self.bounds.height() / self.height as f64
    }

    /// Mesh file name for a step: `zagros_loss_<step>.data`.
    pub fn file_name(step: impl Display) -> String {
        format!("zagros_loss_{}.data", step)
    }

    /// Evaluate `objective` over the mesh, one rayon task per row.
    pub fn sample<O>(&self, objective: &O, step: impl Into<String>) -> LandscapeResult<Grid>
    where
        O: Objective + ?Sized,
    {
        let (dx, dy) = (self.delta_x(), self.delta_y());
        let Bounds { x_min, y_min, .. } = self.bounds;

        let mut z = vec![0.0; self.width * self.height];
        z.par_chunks_mut(self.width).enumerate().for_each(|(y, row)| {
            let py = y_min + y as f64 * dy;
            for (x, value) in row.iter_mut().enumerate() {
                *value = objective.evaluate([x_min + x as f64 * dx, py]);
            }
        });

        let grid = Grid::new(step, self.bounds, self.height, self.width, z)?;
        debug!(
            step = grid.step(),
            width = self.width,
            height = self.height,
            range = ?grid.value_range(),
            "Sampled loss projection"
        );
        Ok(grid)
    }

    /// Sample and write the mesh into `dir`, returning the file path.
    pub fn save<O>(&self, objective: &O, step: impl Display, dir: impl AsRef<Path>) -> LandscapeResult<PathBuf>
    where
        O: Objective + ?Sized,
    {
        let path = dir.as_ref().join(Self::file_name(&step));
        let grid = self.sample(objective, step.to_string())?;
        mesh_format::write(&grid, &path)?;

        info!(path = %path.display(), step = %step, "Saved loss mesh");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(LossProjection::file_name(0), "zagros_loss_0.data");
        assert_eq!(LossProjection::file_name("final"), "zagros_loss_final.data");
    }

    #[test]
    fn test_rejects_empty_shape() {
        assert!(LossProjection::new(0, 4, Bounds::new(0.0, 0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(LossProjection::new(4, 4, Bounds::new(1.0, 0.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_sample_positions() {
        let projection = LossProjection::new(4, 2, Bounds::new(0.0, 10.0, 4.0, 12.0)).unwrap();
        let grid = projection.sample(&|p: [f64; 2]| p[0] * 100.0 + p[1], "s").unwrap();

        assert_eq!(grid.row(0), Some(&[10.0, 110.0, 210.0, 310.0][..]));
        assert_eq!(grid.row(1), Some(&[11.0, 111.0, 211.0, 311.0][..]));
    }
}
