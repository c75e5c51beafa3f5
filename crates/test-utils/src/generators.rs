//! Scalar field generators for synthetic meshes.
//!
//! These generators create predictable, verifiable data patterns that can be
//! used across the test suite. All fields are row-major `Vec<f64>`.

/// Creates a field with predictable values.
///
/// Each cell value is calculated as: `row * 1000 + col`
///
/// # Example
///
/// ```
/// use test_utils::create_index_field;
///
/// let field = create_index_field(10, 5);
/// assert_eq!(field.len(), 50);
/// assert_eq!(field[1], 1.0);     // row=0, col=1
/// assert_eq!(field[10], 1000.0); // row=1, col=0
/// ```
pub fn create_index_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((row * 1000 + col) as f64);
        }
    }
    data
}

/// Creates a field increasing linearly from left (0) to right (100).
pub fn create_ramp_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f64 / width.max(1) as f64 * 100.0);
        }
    }
    data
}

/// Creates a radially symmetric bump: 1 at the center, falling towards 0.
pub fn create_peak_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let sigma = (width.max(height) as f64 / 4.0).max(1.0);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            data.push((-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp());
        }
    }
    data
}

/// Creates a field filled with a constant value.
pub fn create_constant_field(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Formats a field as the fourth record of a mesh document.
pub fn format_field(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a complete mesh document.
pub fn mesh_text(
    step: &str,
    bounds: (f64, f64, f64, f64),
    height: usize,
    width: usize,
    values: &[f64],
) -> String {
    format!(
        "{}\n{} {} {} {}\n{} {}\n{}",
        step,
        bounds.0,
        bounds.1,
        bounds.2,
        bounds.3,
        height,
        width,
        format_field(values)
    )
}
