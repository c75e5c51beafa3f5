//! 3D surface projection.
//!
//! The field is drawn as a height surface over its physical domain with an
//! orthographic camera. Faces are painted back to front (painter's
//! algorithm), so no depth buffer is needed.

use mesh_format::Grid;
use tiny_skia::{FillRule, Paint, PathBuilder, Stroke, Transform};
use tracing::debug;

use crate::canvas::{encode_pixmap, new_pixmap};
use crate::colormap::normalize;
use crate::coords::AxisCoordinates;
use crate::error::{RenderError, RenderResult};
use crate::heatmap::RenderedImage;
use crate::style::RenderStyle;

/// Height of the value axis relative to the horizontal extent.
const Z_ASPECT: f64 = 0.75;

/// Output of the surface projection.
#[derive(Debug, Clone)]
pub struct SurfaceImage {
    pub image: RenderedImage,
    /// Number of quadrilateral faces painted
    pub faces: usize,
}

/// Evenly strided indices into `0..n`, at most roughly `max_count` of them,
/// always including the last index.
pub fn sample_indices(n: usize, max_count: usize) -> Vec<usize> {
    if n == 0 {
        return vec![];
    }
    let stride = n.div_ceil(max_count.max(1)).max(1);
    let mut indices: Vec<usize> = (0..n).step_by(stride).collect();
    if indices.last() != Some(&(n - 1)) {
        indices.push(n - 1);
    }
    indices
}

/// Orthographic camera looking at the origin.
#[derive(Debug, Clone, Copy)]
struct Camera {
    sin_az: f64,
    cos_az: f64,
    sin_el: f64,
    cos_el: f64,
}

impl Camera {
    fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
        let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
        Self {
            sin_az,
            cos_az,
            sin_el,
            cos_el,
        }
    }

    /// Screen `(u, v)` with v pointing up, plus depth towards the viewer.
    fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let toward = x * self.cos_az + y * self.sin_az;
        let u = -x * self.sin_az + y * self.cos_az;
        let v = z * self.cos_el - toward * self.sin_el;
        let depth = toward * self.cos_el + z * self.sin_el;
        (u, v, depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Vertex {
    u: f64,
    v: f64,
    depth: f64,
    value: f64,
}

struct Face {
    corners: [usize; 4],
    depth: f64,
    value: f64,
}

/// Render `grid` as a 3D surface over its true axis coordinates.
pub fn render_surface(grid: &Grid, coords: &AxisCoordinates, style: &RenderStyle) -> RenderResult<SurfaceImage> {
    if grid.width() < 2 || grid.height() < 2 {
        return Err(RenderError::DegenerateSurface {
            height: grid.height(),
            width: grid.width(),
        });
    }

    let opts = &style.surface;
    let rows = sample_indices(grid.height(), opts.row_count);
    let cols = sample_indices(grid.width(), opts.column_count);
    let camera = Camera::new(opts.elevation_deg, opts.azimuth_deg);

    let (z_min, z_max) = grid.value_range().unwrap_or((0.0, 0.0));
    let axis = |values: &[f64]| {
        let first = values[0];
        let span = values[values.len() - 1] - first;
        move |v: f64| (v - first) / span - 0.5
    };
    let norm_x = axis(&coords.x);
    let norm_y = axis(&coords.y);

    let mut vertices = Vec::with_capacity(rows.len() * cols.len());
    for &r in &rows {
        for &c in &cols {
            let value = grid.get(r, c).unwrap_or(z_min);
            let z = (normalize(value, z_min, z_max) - 0.5) * Z_ASPECT;
            let (u, v, depth) = camera.project(norm_x(coords.x[c]), norm_y(coords.y[r]), z);
            vertices.push(Vertex { u, v, depth, value });
        }
    }

    let n_cols = cols.len();
    let mut faces = Vec::with_capacity((rows.len() - 1) * (n_cols - 1));
    for r in 0..rows.len() - 1 {
        for c in 0..n_cols - 1 {
            let corners = [
                r * n_cols + c,
                r * n_cols + c + 1,
                (r + 1) * n_cols + c + 1,
                (r + 1) * n_cols + c,
            ];
            let depth = corners.iter().map(|&i| vertices[i].depth).sum::<f64>() / 4.0;
            let value = corners.iter().map(|&i| vertices[i].value).sum::<f64>() / 4.0;
            faces.push(Face {
                corners,
                depth,
                value,
            });
        }
    }
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    // Fit the projected surface into the square canvas, then crop tight.
    let (u_min, u_max, v_min, v_max) = vertices.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(u0, u1, v0, v1), p| (u0.min(p.u), u1.max(p.u), v0.min(p.v), v1.max(p.v)),
    );
    let span = (u_max - u_min).max(v_max - v_min).max(f64::EPSILON);
    let scale = opts.size as f64 / span;
    let width = (((u_max - u_min) * scale).ceil() as u32).clamp(1, opts.size);
    let height = (((v_max - v_min) * scale).ceil() as u32).clamp(1, opts.size);

    let mut pixmap = new_pixmap(width, height)?;
    let to_canvas = |p: &Vertex| (((p.u - u_min) * scale) as f32, ((v_max - p.v) * scale) as f32);

    let seam = Stroke {
        width: 0.5,
        ..Stroke::default()
    };
    let mut paint = Paint::default();
    paint.anti_alias = opts.antialias;

    for face in &faces {
        let color = style.colormap.sample(normalize(face.value, z_min, z_max));
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);

        let mut pb = PathBuilder::new();
        let (x0, y0) = to_canvas(&vertices[face.corners[0]]);
        pb.move_to(x0, y0);
        for &corner in &face.corners[1..] {
            let (x, y) = to_canvas(&vertices[corner]);
            pb.line_to(x, y);
        }
        pb.close();

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            pixmap.stroke_path(&path, &paint, &seam, Transform::identity(), None);
        }
    }

    debug!(
        sampled_rows = rows.len(),
        sampled_cols = n_cols,
        faces = faces.len(),
        width,
        height,
        "Rendered surface"
    );

    let png = encode_pixmap(&pixmap)?;

    Ok(SurfaceImage {
        image: RenderedImage { png, width, height },
        faces: faces.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_indices_small_input_is_dense() {
        assert_eq!(sample_indices(5, 100), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_indices_caps_count() {
        let indices = sample_indices(1000, 100);
        // 0, 10, ..., 990 plus the final row
        assert_eq!(indices.len(), 101);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[99], 990);
        assert_eq!(*indices.last().unwrap(), 999);
    }

    #[test]
    fn test_sample_indices_keeps_last() {
        let indices = sample_indices(250, 100);
        assert_eq!(*indices.last().unwrap(), 249);
        assert!(indices.len() <= 101);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_camera_depth_orders_towards_viewer() {
        let camera = Camera::new(30.0, -60.0);
        // Raising a point moves it towards a camera above the plane.
        let (_, v_low, d_low) = camera.project(0.0, 0.0, 0.0);
        let (_, v_high, d_high) = camera.project(0.0, 0.0, 1.0);
        assert!(v_high > v_low);
        assert!(d_high > d_low);
    }
}
