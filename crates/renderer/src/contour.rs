//! Contour line (isoline) extraction using the marching squares algorithm.
//!
//! Contours are traced in grid-index space (column, row) and mapped onto the
//! canvas by the caller when stroking.

use std::collections::VecDeque;

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A line segment between two points
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A complete contour line (polyline)
#[derive(Debug, Clone)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Configuration for contour rendering
#[derive(Debug, Clone)]
pub struct ContourConfig {
    /// Contour levels to draw
    pub levels: Vec<f64>,
    /// Line width in pixels
    pub line_width: f32,
    /// Line color [R, G, B, A]
    pub line_color: [u8; 4],
    /// Number of smoothing passes (0 = no smoothing)
    pub smoothing_passes: u32,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: vec![],
            line_width: 2.0,
            line_color: [0, 0, 0, 255],
            smoothing_passes: 0,
        }
    }
}

/// `count` evenly spaced levels strictly inside `(min_value, max_value)`.
///
/// A flat or non-finite range has no iso-value crossings and yields no levels.
pub fn contour_levels(min_value: f64, max_value: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min_value.is_finite() || !max_value.is_finite() || max_value <= min_value {
        return vec![];
    }

    let step = (max_value - min_value) / (count + 1) as f64;
    (1..=count).map(|k| min_value + k as f64 * step).collect()
}

/// Marching squares algorithm to generate contour lines
///
/// # Arguments
/// * `data` - Grid data in row-major order
/// * `width` - Grid width
/// * `height` - Grid height
/// * `level` - Contour level to extract
///
/// # Returns
/// Vector of line segments in grid-index coordinates
pub fn march_squares(data: &[f64], width: usize, height: usize, level: f64) -> Vec<Segment> {
    if width < 2 || height < 2 || data.len() != width * height {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let tl = data[y * width + x];
            let tr = data[y * width + x + 1];
            let bl = data[(y + 1) * width + x];
            let br = data[(y + 1) * width + x + 1];

            if !(tl.is_finite() && tr.is_finite() && bl.is_finite() && br.is_finite()) {
                continue;
            }

            // Cell index (0-15) based on which corners are above the threshold
            let mut cell_index = 0;
            if tl >= level {
                cell_index |= 1;
            }
            if tr >= level {
                cell_index |= 2;
            }
            if br >= level {
                cell_index |= 4;
            }
            if bl >= level {
                cell_index |= 8;
            }

            segments.extend(cell_segments(
                cell_index,
                x as f32,
                y as f32,
                [tl, tr, br, bl],
                level,
            ));
        }
    }

    segments
}

/// Line segments for one marching squares cell, with edge crossings found by
/// linear interpolation. Corners are ordered top-left, top-right,
/// bottom-right, bottom-left.
fn cell_segments(cell_index: u8, x: f32, y: f32, corners: [f64; 4], level: f64) -> Vec<Segment> {
    let [tl, tr, br, bl] = corners;

    let top = interpolate_edge(x, y, x + 1.0, y, tl, tr, level);
    let right = interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = interpolate_edge(x, y, x, y + 1.0, tl, bl, level);

    match cell_index {
        0 | 15 => vec![],
        1 | 14 => vec![Segment { start: left, end: top }],
        2 | 13 => vec![Segment { start: top, end: right }],
        3 | 12 => vec![Segment { start: left, end: right }],
        4 | 11 => vec![Segment { start: right, end: bottom }],
        5 => vec![
            // saddle
            Segment { start: left, end: top },
            Segment { start: right, end: bottom },
        ],
        6 | 9 => vec![Segment { start: top, end: bottom }],
        7 | 8 => vec![Segment { start: left, end: bottom }],
        10 => vec![
            // saddle
            Segment { start: top, end: right },
            Segment { start: left, end: bottom },
        ],
        _ => vec![],
    }
}

/// Linearly interpolate between two edge points based on data values
fn interpolate_edge(x1: f32, y1: f32, x2: f32, y2: f32, val1: f64, val2: f64, level: f64) -> Point {
    if (val2 - val1).abs() < 1e-12 {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }

    let t = ((level - val1) / (val2 - val1)).clamp(0.0, 1.0) as f32;

    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Connect line segments into continuous polylines
///
/// Takes a collection of unordered segments and joins those sharing an
/// endpoint into contour lines.
pub fn connect_segments(segments: Vec<Segment>) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut used = vec![false; segments.len()];
    let epsilon = 0.001; // Tolerance for point matching

    // Index and far endpoint of an unused segment touching `end`
    let find_next = |used: &[bool], end: &Point| {
        segments.iter().enumerate().find_map(|(i, seg)| {
            if used[i] {
                None
            } else if seg.start.distance(end) < epsilon {
                Some((i, seg.end))
            } else if seg.end.distance(end) < epsilon {
                Some((i, seg.start))
            } else {
                None
            }
        })
    };

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;

        let mut points = VecDeque::from([segments[start_idx].start, segments[start_idx].end]);

        // Grow the tail first, then the head, so a line entered mid-way is
        // still traced as one polyline.
        while let Some((i, next)) = points.back().and_then(|end| find_next(used.as_slice(), end)) {
            used[i] = true;
            points.push_back(next);
        }
        while let Some((i, next)) = points.front().and_then(|end| find_next(used.as_slice(), end)) {
            used[i] = true;
            points.push_front(next);
        }

        let closed = match (points.front(), points.back()) {
            (Some(first), Some(last)) => points.len() > 2 && first.distance(last) < epsilon,
            _ => false,
        };
        contours.push(Contour {
            level: 0.0, // set by caller
            points: points.into(),
            closed,
        });
    }

    contours
}

/// Apply Chaikin's corner cutting algorithm for smoothing
pub fn smooth_contour(contour: &Contour, iterations: u32) -> Contour {
    if iterations == 0 || contour.points.len() < 3 {
        return contour.clone();
    }

    let mut points = contour.points.clone();

    for _ in 0..iterations {
        let mut new_points = Vec::with_capacity(points.len() * 2);

        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = if contour.closed {
                points[(i + 1) % points.len()]
            } else if i + 1 < points.len() {
                points[i + 1]
            } else {
                break;
            };

            // 25% and 75% along the segment
            new_points.push(Point::new(0.75 * p1.x + 0.25 * p2.x, 0.75 * p1.y + 0.25 * p2.y));
            new_points.push(Point::new(0.25 * p1.x + 0.75 * p2.x, 0.25 * p1.y + 0.75 * p2.y));
        }

        // Open contours keep their endpoints
        if !contour.closed {
            if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                new_points.insert(0, first);
                new_points.push(last);
            }
        }

        points = new_points;
    }

    Contour {
        level: contour.level,
        points,
        closed: contour.closed,
    }
}

/// Generate all contours for multiple levels
pub fn generate_all_contours(
    data: &[f64],
    width: usize,
    height: usize,
    config: &ContourConfig,
) -> Vec<Contour> {
    let mut all_contours = Vec::new();

    for &level in &config.levels {
        let segments = march_squares(data, width, height, level);
        let mut contours = connect_segments(segments);

        for contour in &mut contours {
            contour.level = level;
            if config.smoothing_passes > 0 {
                *contour = smooth_contour(contour, config.smoothing_passes);
            }
        }

        all_contours.extend(contours);
    }

    all_contours
}

/// Stroke contours onto an existing canvas.
///
/// `to_canvas` maps each grid-index point to canvas pixel coordinates.
pub fn stroke_contours<F>(pixmap: &mut Pixmap, contours: &[Contour], config: &ContourConfig, to_canvas: F)
where
    F: Fn(Point) -> Point,
{
    let [r, g, b, a] = config.line_color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: config.line_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    for contour in contours {
        let mut points = contour.points.iter().map(|&p| to_canvas(p));
        let Some(first) = points.next() else {
            continue;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for point in points {
            pb.line_to(point.x, point.y);
        }
        if contour.closed {
            pb.close();
        }

        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}
