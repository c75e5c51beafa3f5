//! Color scales and color-mapped grid rasterization.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

// Stops sampled at eighths of each scale.
const PLASMA: [Color; 9] = [
    Color::rgb(13, 8, 135),
    Color::rgb(76, 2, 161),
    Color::rgb(126, 3, 168),
    Color::rgb(168, 34, 150),
    Color::rgb(204, 71, 120),
    Color::rgb(230, 108, 92),
    Color::rgb(248, 149, 64),
    Color::rgb(253, 197, 39),
    Color::rgb(240, 249, 33),
];

const VIRIDIS: [Color; 9] = [
    Color::rgb(68, 1, 84),
    Color::rgb(71, 45, 123),
    Color::rgb(59, 82, 139),
    Color::rgb(44, 114, 142),
    Color::rgb(33, 145, 140),
    Color::rgb(40, 174, 128),
    Color::rgb(94, 201, 98),
    Color::rgb(173, 220, 48),
    Color::rgb(253, 231, 37),
];

const INFERNO: [Color; 9] = [
    Color::rgb(0, 0, 4),
    Color::rgb(31, 12, 72),
    Color::rgb(85, 15, 109),
    Color::rgb(136, 34, 106),
    Color::rgb(186, 54, 85),
    Color::rgb(227, 89, 51),
    Color::rgb(249, 140, 10),
    Color::rgb(249, 201, 50),
    Color::rgb(252, 255, 164),
];

const GREYS: [Color; 2] = [Color::rgb(255, 255, 255), Color::rgb(0, 0, 0)];

/// Named perceptually ordered palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Plasma,
    Viridis,
    Inferno,
    Greys,
}

impl Palette {
    fn stops(self) -> &'static [Color] {
        match self {
            Palette::Plasma => &PLASMA,
            Palette::Viridis => &VIRIDIS,
            Palette::Inferno => &INFERNO,
            Palette::Greys => &GREYS,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Palette::Plasma => "plasma",
            Palette::Viridis => "viridis",
            Palette::Inferno => "inferno",
            Palette::Greys => "Greys",
        }
    }
}

/// A palette plus orientation, named like `plasma` or `plasma_r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    pub palette: Palette,
    pub reversed: bool,
}

impl Default for Colormap {
    fn default() -> Self {
        Self {
            palette: Palette::Plasma,
            reversed: true,
        }
    }
}

impl Colormap {
    pub fn new(palette: Palette, reversed: bool) -> Self {
        Self { palette, reversed }
    }

    /// Color for a normalized value in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let stops = self.palette.stops();
        let segments = stops.len() - 1;
        let pos = t * segments as f64;
        let idx = (pos.floor() as usize).min(segments - 1);
        let frac = (pos - idx as f64) as f32;

        interpolate_color(stops[idx], stops[idx + 1], frac)
    }
}

impl FromStr for Colormap {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, reversed) = match s.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (s, false),
        };
        let palette = match base.to_ascii_lowercase().as_str() {
            "plasma" => Palette::Plasma,
            "viridis" => Palette::Viridis,
            "inferno" => Palette::Inferno,
            "greys" | "grays" => Palette::Greys,
            _ => return Err(RenderError::UnknownColormap(s.to_string())),
        };
        Ok(Self { palette, reversed })
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.palette.name())?;
        if self.reversed {
            write!(f, "_r")?;
        }
        Ok(())
    }
}

/// Normalize `value` into `[0, 1]` over `[min_val, max_val]`.
///
/// A flat range maps everything to 0.
pub fn normalize(value: f64, min_val: f64, max_val: f64) -> f64 {
    let range = max_val - min_val;
    if range <= 0.0 || !range.is_finite() {
        return 0.0;
    }
    ((value - min_val) / range).clamp(0.0, 1.0)
}

/// Resample row-major grid data to a different resolution, taking the
/// nearest source cell for each destination pixel.
pub fn resample_nearest<T: Copy>(
    data: &[T],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Vec<T> {
    if src_width == dst_width && src_height == dst_height {
        return data.to_vec();
    }

    let x_ratio = src_width as f64 / dst_width as f64;
    let y_ratio = src_height as f64 / dst_height as f64;

    let mut output = Vec::with_capacity(dst_width * dst_height);
    for y in 0..dst_height {
        let src_y = (((y as f64 + 0.5) * y_ratio) as usize).min(src_height - 1);
        for x in 0..dst_width {
            let src_x = (((x as f64 + 0.5) * x_ratio) as usize).min(src_width - 1);
            output.push(data[src_y * src_width + src_x]);
        }
    }

    output
}

/// Render grid data as a color-mapped image.
///
/// # Arguments
/// - `data`: 2D grid of values (row-major order)
/// - `width`: Number of columns
/// - `height`: Number of rows
/// - `min_val`/`max_val`: Value range mapped onto the colormap
/// - `colormap`: Color scale
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel). Non-finite values are transparent.
pub fn render_grid(
    data: &[f64],
    width: usize,
    height: usize,
    min_val: f64,
    max_val: f64,
    colormap: &Colormap,
) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];

    for (idx, &value) in data.iter().take(width * height).enumerate() {
        let color = if value.is_finite() {
            colormap.sample(normalize(value, min_val, max_val))
        } else {
            Color::transparent()
        };

        let pixel_idx = idx * 4;
        pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_array());
    }

    pixels
}
