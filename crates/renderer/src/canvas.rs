//! Canvas helpers bridging tiny-skia pixmaps and the PNG encoder.

use tiny_skia::{IntSize, Pixmap};

use crate::error::{RenderError, RenderResult};
use crate::png::create_png_auto;

/// A transparent canvas.
pub fn new_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })
}

/// Wrap opaque or premultiplied RGBA bytes in a pixmap.
pub fn pixmap_from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> RenderResult<Pixmap> {
    let size = IntSize::from_wh(width, height).ok_or(RenderError::Canvas { width, height })?;
    Pixmap::from_vec(pixels, size).ok_or(RenderError::Canvas { width, height })
}

/// Straight-alpha RGBA bytes of a pixmap.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

/// Encode a pixmap as PNG.
pub fn encode_pixmap(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    create_png_auto(
        &pixmap_to_rgba(pixmap),
        pixmap.width() as usize,
        pixmap.height() as usize,
    )
}
