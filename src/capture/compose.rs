//! Pure pixel composition — functional core.
//!
//! Takes captured pixels in, returns PNG bytes out. No OS access.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

use super::config::RenderOptions;

/// Lays the captured image out at the viewport size, places it on the
/// output canvas anchored top-left, and encodes the canvas as PNG.
///
/// Overflow past the canvas is cropped; uncovered canvas stays
/// transparent.
pub fn compose_png(image: &DynamicImage, options: &RenderOptions) -> Result<Vec<u8>, ComposeError> {
    if options.width == 0 || options.height == 0 {
        return Err(ComposeError::ZeroDimension);
    }

    let mut canvas = RgbaImage::new(options.width, options.height);

    if options.viewport_width > 0 && options.viewport_height > 0 {
        let laid_out = image.resize_exact(
            options.viewport_width,
            options.viewport_height,
            FilterType::Triangle,
        );
        imageops::overlay(&mut canvas, &laid_out.to_rgba8(), 0, 0);
    }

    let mut png_bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| ComposeError::EncodingFailed(e.to_string()))?;

    Ok(png_bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Output canvas has zero width or height")]
    ZeroDimension,

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
    }

    fn options(width: u32, height: u32, viewport_width: u32, viewport_height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            viewport_width,
            viewport_height,
        }
    }

    #[test]
    fn produces_png_of_the_output_dimensions() {
        let bytes = compose_png(&solid(100, 100, [10, 20, 30, 255]), &options(64, 32, 64, 32)).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 32));
    }

    #[test]
    fn zero_output_dimension_fails() {
        let result = compose_png(&solid(10, 10, [0, 0, 0, 255]), &options(0, 10, 10, 10));
        assert!(matches!(result, Err(ComposeError::ZeroDimension)));
    }

    #[test]
    fn small_viewport_leaves_the_rest_of_the_canvas_transparent() {
        let bytes = compose_png(&solid(10, 10, [255, 0, 0, 255]), &options(20, 20, 10, 10)).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(5, 5).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(15, 15).0[3], 0);
    }

    #[test]
    fn viewport_overflow_is_cropped_to_the_canvas() {
        let bytes = compose_png(&solid(10, 10, [0, 255, 0, 255]), &options(8, 8, 16, 16)).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }

    #[test]
    fn zero_viewport_yields_a_fully_transparent_canvas() {
        let bytes = compose_png(&solid(10, 10, [255, 255, 255, 255]), &options(4, 4, 0, 10)).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert!(decoded.pixels().all(|p| p.0[3] == 0));
    }
}
