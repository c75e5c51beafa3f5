//! Style configuration for mesh rendering.
//!
//! Styling is passed explicitly into every render call. A style file is a
//! JSON document whose fields all fall back to the defaults below:
//!
//! ```json
//! {
//!   "colormap": "plasma_r",
//!   "dpi": 96.0,
//!   "contour": { "levels": 5, "line_width": 2.0, "line_color": [0, 0, 0, 255] },
//!   "surface": { "size": 800, "column_count": 100 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;
use crate::error::{RenderError, RenderResult};

/// Top-level rendering style.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Color scale for heatmaps, surfaces
    #[serde(with = "colormap_name")]
    pub colormap: Colormap,
    /// Output resolution in pixels per inch
    pub dpi: f64,
    /// Grid cells per inch of figure size
    pub cells_per_inch: f64,
    pub contour: ContourStyle,
    pub surface: SurfaceStyle,
    pub chart: ChartStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            dpi: 96.0,
            cells_per_inch: 65.0,
            contour: ContourStyle::default(),
            surface: SurfaceStyle::default(),
            chart: ChartStyle::default(),
        }
    }
}

/// Contour overlay options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContourStyle {
    /// Number of iso-value levels
    pub levels: usize,
    pub line_width: f32,
    pub line_color: [u8; 4],
    pub smoothing_passes: u32,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            levels: 5,
            line_width: 2.0,
            line_color: [0, 0, 0, 255],
            smoothing_passes: 0,
        }
    }
}

/// 3D surface options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceStyle {
    /// Side of the square canvas in pixels
    pub size: u32,
    /// Maximum number of sampled columns
    pub column_count: usize,
    /// Maximum number of sampled rows
    pub row_count: usize,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub antialias: bool,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            size: 800,
            column_count: 100,
            row_count: 50,
            elevation_deg: 30.0,
            azimuth_deg: -60.0,
            antialias: true,
        }
    }
}

/// Line chart options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub line_width: f32,
    pub background: [u8; 4],
    pub axis_color: [u8; 4],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 40,
            line_width: 2.0,
            background: [255, 255, 255, 255],
            axis_color: [64, 64, 64, 255],
        }
    }
}

impl RenderStyle {
    /// Load style configuration from JSON string
    pub fn from_json(json_str: &str) -> RenderResult<Self> {
        let style: Self = serde_json::from_str(json_str)?;
        style.validate()?;
        Ok(style)
    }

    /// Load style configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(RenderError::Style(format!("dpi must be positive, got {}", self.dpi)));
        }
        if !(self.cells_per_inch.is_finite() && self.cells_per_inch > 0.0) {
            return Err(RenderError::Style(format!(
                "cells_per_inch must be positive, got {}",
                self.cells_per_inch
            )));
        }
        if self.surface.size == 0 {
            return Err(RenderError::Style("surface size must be positive".to_string()));
        }
        if self.surface.column_count < 2 || self.surface.row_count < 2 {
            return Err(RenderError::Style(
                "surface sampling counts must be at least 2".to_string(),
            ));
        }
        if self.chart.width <= 2 * self.chart.margin || self.chart.height <= 2 * self.chart.margin {
            return Err(RenderError::Style("chart margin leaves no plot area".to_string()));
        }
        Ok(())
    }
}

mod colormap_name {
    use super::Colormap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cmap: &Colormap, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&cmap.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Colormap, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse hex color string to RGBA
pub fn hex_to_rgba(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Palette;

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#FF0000"), Some([255, 0, 0, 255]));
        assert_eq!(hex_to_rgba("00FF0080"), Some([0, 255, 0, 128]));
        assert_eq!(hex_to_rgba("#GGGGGG"), None);
        assert_eq!(hex_to_rgba("#FFF"), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let style = RenderStyle::from_json(r#"{"colormap": "viridis", "contour": {"levels": 3}}"#).unwrap();
        assert_eq!(style.colormap.palette, Palette::Viridis);
        assert!(!style.colormap.reversed);
        assert_eq!(style.contour.levels, 3);
        assert_eq!(style.contour.line_width, 2.0);
        assert_eq!(style.surface, SurfaceStyle::default());
    }

    #[test]
    fn test_unknown_colormap_rejected() {
        assert!(RenderStyle::from_json(r#"{"colormap": "rainbow"}"#).is_err());
    }

    #[test]
    fn test_invalid_dpi_rejected() {
        let err = RenderStyle::from_json(r#"{"dpi": 0}"#).unwrap_err();
        assert!(matches!(err, RenderError::Style(_)));
    }

    #[test]
    fn test_serialize_uses_colormap_name() {
        let json = serde_json::to_string(&RenderStyle::default()).unwrap();
        assert!(json.contains("\"plasma_r\""));
    }
}
