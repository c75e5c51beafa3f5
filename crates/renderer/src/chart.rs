//! Minimal line charts for optimizer run logs.
//!
//! Charts carry plain axes and no text; each series is one polyline in a
//! categorical color.

use tiny_skia::{Color as SkiaColor, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

use crate::canvas::{encode_pixmap, new_pixmap};
use crate::error::{RenderError, RenderResult};
use crate::heatmap::RenderedImage;
use crate::style::{hex_to_rgba, ChartStyle};

/// Categorical palette cycled across series.
const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Color of the `index`-th series.
pub fn series_color(index: usize) -> [u8; 4] {
    hex_to_rgba(TAB10[index % TAB10.len()]).unwrap_or([0, 0, 0, 255])
}

/// A named sequence of `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// Data extent over all finite points, padded so it is never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Extent {
    fn of(series: &[Series]) -> Option<Self> {
        let mut points = series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let &(x0, y0) = points.next()?;
        let mut extent = Self {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        for &(x, y) in points {
            extent.x_min = extent.x_min.min(x);
            extent.x_max = extent.x_max.max(x);
            extent.y_min = extent.y_min.min(y);
            extent.y_max = extent.y_max.max(y);
        }

        if extent.x_max == extent.x_min {
            extent.x_min -= 0.5;
            extent.x_max += 0.5;
        }
        if extent.y_max == extent.y_min {
            extent.y_min -= 0.5;
            extent.y_max += 0.5;
        }
        Some(extent)
    }
}

/// Render `series` as a line chart.
pub fn render_line_chart(series: &[Series], style: &ChartStyle) -> RenderResult<RenderedImage> {
    let extent = Extent::of(series).ok_or(RenderError::EmptyChart)?;

    let mut pixmap = new_pixmap(style.width, style.height)?;
    let [r, g, b, a] = style.background;
    pixmap.fill(SkiaColor::from_rgba8(r, g, b, a));

    let margin = style.margin as f32;
    let plot_w = style.width as f32 - 2.0 * margin;
    let plot_h = style.height as f32 - 2.0 * margin;
    let to_canvas = |x: f64, y: f64| {
        let tx = ((x - extent.x_min) / (extent.x_max - extent.x_min)) as f32;
        let ty = ((y - extent.y_min) / (extent.y_max - extent.y_min)) as f32;
        (margin + tx * plot_w, margin + (1.0 - ty) * plot_h)
    };

    draw_axes(&mut pixmap, margin, plot_w, plot_h, style);

    let stroke = Stroke {
        width: style.line_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    for (index, s) in series.iter().enumerate() {
        let mut paint = Paint::default();
        let [r, g, b, a] = series_color(index);
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let mut finite = s.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
        let Some(&(x0, y0)) = finite.next() else {
            continue;
        };

        let mut pb = PathBuilder::new();
        let (cx, cy) = to_canvas(x0, y0);
        pb.move_to(cx, cy);
        let mut segments = 0;
        for &(x, y) in finite {
            let (cx, cy) = to_canvas(x, y);
            pb.line_to(cx, cy);
            segments += 1;
        }

        if segments == 0 {
            // A single sample is drawn as a dot.
            let radius = style.line_width.max(1.0) * 1.5;
            if let Some(dot) = PathBuilder::from_circle(cx, cy, radius) {
                pixmap.fill_path(&dot, &paint, tiny_skia::FillRule::Winding, Transform::identity(), None);
            }
        } else if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    debug!(
        series = series.len(),
        points = series.iter().map(|s| s.points.len()).sum::<usize>(),
        width = style.width,
        height = style.height,
        "Rendered line chart"
    );

    Ok(RenderedImage {
        png: encode_pixmap(&pixmap)?,
        width: style.width,
        height: style.height,
    })
}

fn draw_axes(pixmap: &mut Pixmap, margin: f32, plot_w: f32, plot_h: f32, style: &ChartStyle) {
    let mut paint = Paint::default();
    let [r, g, b, a] = style.axis_color;
    paint.set_color_rgba8(r, g, b, a);

    // Left and bottom spines, one pixel wide.
    if let Some(rect) = Rect::from_xywh(margin - 1.0, margin, 1.0, plot_h + 1.0) {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
    if let Some(rect) = Rect::from_xywh(margin - 1.0, margin + plot_h, plot_w + 1.0, 1.0) {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}
