//! In-memory representation of a decoded mesh.

use crate::error::FormatError;

/// Physical extent of the domain a grid covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Bounds are usable when finite, strictly ordered on both axes, and
    /// their spans are representable.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.y_min, self.x_max, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_max > self.x_min
            && self.y_max > self.y_min
            && self.width().is_finite()
            && self.height().is_finite()
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A rectangular scalar field plus the metadata describing its domain.
///
/// Values are stored row-major with shape `(height, width)`. The constructor
/// enforces the shape and bounds invariants, so a `Grid` is always complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    step: String,
    bounds: Bounds,
    width: usize,
    height: usize,
    z: Vec<f64>,
}

impl Grid {
    pub fn new(
        step: impl Into<String>,
        bounds: Bounds,
        height: usize,
        width: usize,
        z: Vec<f64>,
    ) -> Result<Self, FormatError> {
        let step = step.into();
        // The label occupies one record; encode must round-trip it.
        if step.contains('\n') || step.ends_with('\r') {
            return Err(FormatError::InvalidStep { label: step });
        }
        if width == 0 || height == 0 {
            return Err(FormatError::EmptyShape { height, width });
        }
        if !bounds.is_valid() {
            return Err(FormatError::InvalidBounds {
                x_min: bounds.x_min,
                y_min: bounds.y_min,
                x_max: bounds.x_max,
                y_max: bounds.y_max,
            });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(FormatError::ShapeOverflow { height, width })?;
        if z.len() != expected {
            return Err(FormatError::ShapeMismatch {
                height,
                width,
                expected,
                actual: z.len(),
            });
        }

        Ok(Self {
            step,
            bounds,
            width,
            height,
            z,
        })
    }

    /// Opaque label of the simulation step this mesh was captured at.
    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Row-major flattened field.
    pub fn values(&self) -> &[f64] {
        &self.z
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.z[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.z.chunks_exact(self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.z[row * self.width + col])
    }

    /// Physical distance between adjacent columns.
    pub fn delta_x(&self) -> f64 {
        self.bounds.width() / self.width as f64
    }

    /// Physical distance between adjacent rows.
    pub fn delta_y(&self) -> f64 {
        self.bounds.height() / self.height as f64
    }

    /// Minimum and maximum over the finite values, if there are any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Position `(row, col)` of the first NaN or infinite value.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.z
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.width, idx % self.width))
    }
}
