//! Heatmap projection with optional contour overlay.

use mesh_format::Grid;
use tracing::debug;

use crate::canvas::{encode_pixmap, pixmap_from_rgba};
use crate::colormap::{render_grid, resample_nearest};
use crate::contour::{contour_levels, generate_all_contours, stroke_contours, ContourConfig, Point};
use crate::coords::AxisCoordinates;
use crate::error::RenderResult;
use crate::style::RenderStyle;

/// An encoded image and its pixel dimensions.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Output of the heatmap projection.
#[derive(Debug, Clone)]
pub struct HeatmapImage {
    pub image: RenderedImage,
    /// Number of contour polylines drawn over the image
    pub contour_lines: usize,
}

/// Pixel size of a heatmap and its per-cell scale factors.
///
/// The figure measures `(height / cells_per_inch, width / cells_per_inch)`
/// inches. The grid is fitted into it at equal aspect and the result cropped
/// to the image itself, leaving no padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapLayout {
    pub width: u32,
    pub height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl HeatmapLayout {
    pub fn for_grid(grid_width: usize, grid_height: usize, style: &RenderStyle) -> Self {
        let (gw, gh) = (grid_width as f64, grid_height as f64);
        let figure_w = gh / style.cells_per_inch * style.dpi;
        let figure_h = gw / style.cells_per_inch * style.dpi;
        let scale = (figure_w / gw).min(figure_h / gh);

        let width = ((gw * scale).round() as u32).max(1);
        let height = ((gh * scale).round() as u32).max(1);

        Self {
            width,
            height,
            scale_x: width as f64 / gw,
            scale_y: height as f64 / gh,
        }
    }
}

/// Render `grid` as a color-mapped image, optionally overlaying contours.
pub fn render_heatmap(
    grid: &Grid,
    coords: &AxisCoordinates,
    contour: bool,
    style: &RenderStyle,
) -> RenderResult<HeatmapImage> {
    let layout = HeatmapLayout::for_grid(grid.width(), grid.height(), style);
    let (min_val, max_val) = grid.value_range().unwrap_or((0.0, 0.0));

    let resampled = resample_nearest(
        grid.values(),
        grid.width(),
        grid.height(),
        layout.width as usize,
        layout.height as usize,
    );
    let pixels = render_grid(
        &resampled,
        layout.width as usize,
        layout.height as usize,
        min_val,
        max_val,
        &style.colormap,
    );
    let mut pixmap = pixmap_from_rgba(pixels, layout.width, layout.height)?;

    let mut contour_lines = 0;
    if contour {
        let config = ContourConfig {
            levels: contour_levels(min_val, max_val, style.contour.levels),
            line_width: style.contour.line_width,
            line_color: style.contour.line_color,
            smoothing_passes: style.contour.smoothing_passes,
        };
        let contours = generate_all_contours(grid.values(), grid.width(), grid.height(), &config);
        contour_lines = contours.len();

        if !contours.is_empty() {
            let pixel_space = coords
                .meshgrid()
                .to_pixel_index_space(coords.delta_x, coords.delta_y);

            // Pixel index i covers [i - 0.5, i + 0.5) in image space.
            stroke_contours(&mut pixmap, &contours, &config, |p| {
                let (px, py) = pixel_space.sample(p.x as f64, p.y as f64);
                Point::new(
                    ((px + 0.5) * layout.scale_x) as f32,
                    ((py + 0.5) * layout.scale_y) as f32,
                )
            });
        }

        debug!(
            levels = config.levels.len(),
            contours = contour_lines,
            total_points = contours.iter().map(|c| c.points.len()).sum::<usize>(),
            "Generated contours"
        );
    }

    let png = encode_pixmap(&pixmap)?;

    Ok(HeatmapImage {
        image: RenderedImage {
            png,
            width: layout.width,
            height: layout.height,
        },
        contour_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_layout_scale() {
        let layout = HeatmapLayout::for_grid(650, 650, &RenderStyle::default());
        // 10 inches at 96 dpi
        assert_eq!(layout.width, 960);
        assert_eq!(layout.height, 960);
    }

    #[test]
    fn test_wide_grid_keeps_aspect() {
        let layout = HeatmapLayout::for_grid(200, 100, &RenderStyle::default());
        assert_eq!(layout.width, 2 * layout.height);
    }

    #[test]
    fn test_tiny_grid_is_at_least_one_pixel() {
        let style = RenderStyle {
            dpi: 1.0,
            ..RenderStyle::default()
        };
        let layout = HeatmapLayout::for_grid(1, 1, &style);
        assert_eq!((layout.width, layout.height), (1, 1));
    }
}
