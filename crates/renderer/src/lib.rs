//! Image rendering for mesh fields.
//!
//! Implements the projections a decoded [`mesh_format::Grid`] can be drawn as:
//! - Heatmap with optional contour overlay
//! - 3D surface (orthographic, painter's algorithm)
//! - Line charts for optimizer run logs
//!
//! [`render`] is the entry point used by the CLI; the projection modules are
//! public for callers that want the encoded bytes without touching disk.

pub mod canvas;
pub mod chart;
pub mod colormap;
pub mod contour;
pub mod coords;
pub mod error;
pub mod field;
pub mod heatmap;
pub mod png;
pub mod style;
pub mod surface;

pub use chart::{render_line_chart, Series};
pub use colormap::Colormap;
pub use coords::AxisCoordinates;
pub use error::{RenderError, RenderResult};
pub use field::{output_path, render, ProjectionMode, RenderConfig};
pub use heatmap::{render_heatmap, HeatmapImage, RenderedImage};
pub use style::{ChartStyle, ContourStyle, RenderStyle, SurfaceStyle};
pub use surface::{render_surface, SurfaceImage};
