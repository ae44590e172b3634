//! Direct rasterization.
//!
//! Draws each bar run as one filled rectangle. This is the native path for
//! callers that own a framebuffer; it produces the same pixels as
//! [`ComposedImage::to_image`](super::ComposedImage::to_image) for the padded
//! pattern.

use image::{GrayImage, ImageEncoder};

use super::palette::{BAR, SPACE};
use crate::error::CardcodeError;
use crate::symbol::BitPattern;

/// Rasterize `bits` at `module_width_px` per module, `height_px` tall.
///
/// Fails with `InvalidDimensions` when the bitmap width does not fit in a
/// `u32`.
pub fn rasterize(
    bits: &BitPattern,
    module_width_px: u32,
    height_px: u32,
) -> Result<GrayImage, CardcodeError> {
    let width = super::symbol_width_px(bits, module_width_px).ok_or(
        CardcodeError::InvalidDimensions {
            module_width_px,
            height_px,
        },
    )?;
    let mut img = GrayImage::from_pixel(width, height_px, SPACE);

    // every run ends inside the pattern, so these products are bounded by `width`
    for run in bits.runs().into_iter().filter(|r| r.bar) {
        let x0 = run.start as u32 * module_width_px;
        let x1 = x0 + run.len as u32 * module_width_px;
        for y in 0..height_px {
            for x in x0..x1 {
                img.put_pixel(x, y, BAR);
            }
        }
    }

    Ok(img)
}

/// Encode a grayscale bitmap as PNG bytes.
pub fn to_png(img: &GrayImage) -> Result<Vec<u8>, CardcodeError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e: image::ImageError| CardcodeError::Image(e.to_string()))?;
    Ok(png_bytes)
}
