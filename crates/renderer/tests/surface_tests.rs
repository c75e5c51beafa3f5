//! Tests for the 3D surface projection.

use mesh_format::{Bounds, Grid};
use renderer::surface::sample_indices;
use renderer::{render_surface, AxisCoordinates, RenderError, RenderStyle};
use test_utils::generators::{create_constant_field, create_peak_field};

fn grid(values: Vec<f64>, height: usize, width: usize) -> Grid {
    Grid::new("3", Bounds::new(-5.0, -5.0, 5.0, 5.0), height, width, values).unwrap()
}

fn decode_png(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn test_surface_fits_square_canvas() {
    let g = grid(create_peak_field(30, 20), 20, 30);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &RenderStyle::default()).unwrap();

    let image = decode_png(&surface.image.png);
    assert_eq!(image.dimensions(), (surface.image.width, surface.image.height));
    assert_eq!(image.width().max(image.height()), 800);
    assert!(image.width() <= 800 && image.height() <= 800);
}

#[test]
fn test_surface_is_transparent_outside_the_mesh() {
    let g = grid(create_peak_field(30, 20), 20, 30);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &RenderStyle::default()).unwrap();
    let image = decode_png(&surface.image.png);

    assert!(image.pixels().any(|p| p.0[3] == 0));
    assert!(image.pixels().any(|p| p.0[3] == 255));
}

#[test]
fn test_small_grid_uses_every_cell() {
    let g = grid(create_peak_field(30, 20), 20, 30);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &RenderStyle::default()).unwrap();
    assert_eq!(surface.faces, 19 * 29);
}

#[test]
fn test_large_grid_is_subsampled() {
    let (height, width) = (120, 300);
    let g = grid(create_peak_field(width, height), height, width);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &RenderStyle::default()).unwrap();

    let rows = sample_indices(height, 50).len();
    let cols = sample_indices(width, 100).len();
    assert_eq!((rows, cols), (41, 101));
    assert_eq!(surface.faces, (rows - 1) * (cols - 1));
}

#[test]
fn test_uniform_surface_renders() {
    let g = grid(create_constant_field(10, 10, 2.0), 10, 10);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &RenderStyle::default()).unwrap();
    assert_eq!(surface.faces, 81);
    assert!(decode_png(&surface.image.png).pixels().any(|p| p.0[3] == 255));
}

#[test]
fn test_canvas_size_follows_style() {
    let mut style = RenderStyle::default();
    style.surface.size = 200;
    style.surface.antialias = false;

    let g = grid(create_peak_field(12, 12), 12, 12);
    let surface = render_surface(&g, &AxisCoordinates::from_grid(&g), &style).unwrap();
    assert_eq!(surface.image.width.max(surface.image.height), 200);
}

#[test]
fn test_degenerate_grids_rejected() {
    let style = RenderStyle::default();
    for (height, width) in [(1, 5), (5, 1), (1, 1)] {
        let g = grid(vec![0.0; height * width], height, width);
        let err = render_surface(&g, &AxisCoordinates::from_grid(&g), &style).unwrap_err();
        assert!(matches!(err, RenderError::DegenerateSurface { .. }));
    }
}
