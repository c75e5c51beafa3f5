//! Field rendering entry point.
//!
//! [`render`] turns one decoded [`Grid`] into PNG files beside the input
//! path. Every requested projection is rasterized and encoded in memory
//! first; files are only written once all of them succeeded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mesh_format::Grid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coords::AxisCoordinates;
use crate::error::{RenderError, RenderResult};
use crate::heatmap::{render_heatmap, RenderedImage};
use crate::style::RenderStyle;
use crate::surface::render_surface;

/// Which projections of the field to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Heatmap,
    Surface,
    Both,
}

impl ProjectionMode {
    fn projections(self) -> &'static [Projection] {
        match self {
            ProjectionMode::Heatmap => &[Projection::Heatmap],
            ProjectionMode::Surface => &[Projection::Surface],
            ProjectionMode::Both => &[Projection::Heatmap, Projection::Surface],
        }
    }

    /// Names of the projections produced, in render order.
    pub fn projection_names(self) -> Vec<&'static str> {
        self.projections().iter().map(|p| p.label()).collect()
    }
}

impl FromStr for ProjectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heatmap" => Ok(ProjectionMode::Heatmap),
            "surface" => Ok(ProjectionMode::Surface),
            "both" => Ok(ProjectionMode::Both),
            other => Err(format!("unknown projection mode '{}'", other)),
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectionMode::Heatmap => "heatmap",
            ProjectionMode::Surface => "surface",
            ProjectionMode::Both => "both",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    Heatmap,
    Surface,
}

impl Projection {
    fn label(self) -> &'static str {
        match self {
            Projection::Heatmap => "heatmap",
            Projection::Surface => "surface",
        }
    }
}

/// Options for a single [`render`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Overlay contour lines on the heatmap
    pub contour: bool,
    pub mode: ProjectionMode,
    /// Appended to the derived file name
    pub label_suffix: Option<String>,
    pub style: RenderStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            contour: true,
            mode: ProjectionMode::Heatmap,
            label_suffix: None,
            style: RenderStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Label for a projection's file name.
    ///
    /// A lone projection takes the suffix as-is (possibly empty); with
    /// several, each gets its own name, prefixed by the suffix.
    fn label_for(&self, projection: Projection) -> String {
        let suffix = self.label_suffix.as_deref().unwrap_or("");
        if self.mode.projections().len() == 1 {
            return suffix.to_string();
        }
        if suffix.is_empty() {
            projection.label().to_string()
        } else {
            format!("{}_{}", suffix, projection.label())
        }
    }
}

/// Derive the PNG path for `input` with an optional `label`.
///
/// The stem is the file name up to its final `.` (the whole name when it
/// has none); the result is `dir/stem.png` or `dir/stem_label.png`.
pub fn output_path(input: impl AsRef<Path>, label: &str) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name.as_str(),
    };

    let file_name = if label.is_empty() {
        format!("{}.png", stem)
    } else {
        format!("{}_{}.png", stem, label)
    };

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Render every projection `config` asks for and write them beside
/// `output_base`. Returns the written paths in projection order.
pub fn render(grid: &Grid, output_base: impl AsRef<Path>, config: &RenderConfig) -> RenderResult<Vec<PathBuf>> {
    let output_base = output_base.as_ref();

    if let Some((row, col)) = grid.first_non_finite() {
        return Err(RenderError::NonFiniteValue { row, col });
    }

    let coords = AxisCoordinates::from_grid(grid);
    let mut rendered: Vec<(PathBuf, RenderedImage)> = Vec::new();

    for &projection in config.mode.projections() {
        let image = match projection {
            Projection::Heatmap => {
                let heatmap = render_heatmap(grid, &coords, config.contour, &config.style)?;
                debug!(contour_lines = heatmap.contour_lines, "Heatmap ready");
                heatmap.image
            }
            Projection::Surface => {
                let surface = render_surface(grid, &coords, &config.style)?;
                debug!(faces = surface.faces, "Surface ready");
                surface.image
            }
        };
        rendered.push((output_path(output_base, &config.label_for(projection)), image));
    }

    let mut written = Vec::with_capacity(rendered.len());
    for (path, image) in rendered {
        std::fs::write(&path, &image.png).map_err(|e| RenderError::io(&path, e))?;
        info!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            bytes = image.png.len(),
            "Wrote image"
        );
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_strips_final_extension() {
        assert_eq!(output_path("out/run.1.data", ""), PathBuf::from("out/run.1.png"));
        assert_eq!(output_path("field.data", ""), PathBuf::from("field.png"));
    }

    #[test]
    fn test_output_path_without_extension_keeps_name() {
        assert_eq!(output_path("dir/mesh", "surface"), PathBuf::from("dir/mesh_surface.png"));
    }

    #[test]
    fn test_output_path_with_label() {
        assert_eq!(
            output_path("/tmp/zagros_loss_12.data", "heatmap"),
            PathBuf::from("/tmp/zagros_loss_12_heatmap.png")
        );
    }

    #[test]
    fn test_labels_for_single_projection() {
        let mut config = RenderConfig::default();
        assert_eq!(config.label_for(Projection::Heatmap), "");

        config.label_suffix = Some("run3".to_string());
        assert_eq!(config.label_for(Projection::Heatmap), "run3");
    }

    #[test]
    fn test_labels_for_both_projections() {
        let mut config = RenderConfig {
            mode: ProjectionMode::Both,
            ..RenderConfig::default()
        };
        assert_eq!(config.label_for(Projection::Heatmap), "heatmap");
        assert_eq!(config.label_for(Projection::Surface), "surface");

        config.label_suffix = Some("run3".to_string());
        assert_eq!(config.label_for(Projection::Surface), "run3_surface");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Both".parse::<ProjectionMode>().unwrap(), ProjectionMode::Both);
        assert_eq!(ProjectionMode::Surface.to_string(), "surface");
        assert!("volume".parse::<ProjectionMode>().is_err());
        assert_eq!(ProjectionMode::Both.projection_names(), vec!["heatmap", "surface"]);
    }
}
