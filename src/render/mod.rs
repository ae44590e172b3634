//! # Rendering Module
//!
//! Turns encoded symbols into something a screen can show.
//!
//! ## Modules
//!
//! - [`palette`]: the 32 precomputed 5-module tiles
//! - [`composer`]: packs a module pattern into a row of tiles
//! - [`raster`]: draws a module pattern straight into a bitmap
//!
//! ## Usage Example
//!
//! ```
//! use cardcode::render::{self, TilePalette};
//! use cardcode::symbol::{Format, SymbolRequest};
//!
//! let request = SymbolRequest::new("590123412345", Format::Ean13);
//! let rendered = render::render(&request).unwrap();
//!
//! // 95 modules padded to 95 -> 19 tiles, 15 px each at the default 3 px/module
//! assert_eq!(rendered.image.len(), 19);
//! assert_eq!(rendered.image.width_px(), 285);
//!
//! let bitmap = rendered.image.to_image(TilePalette::shared());
//! assert_eq!(bitmap.height(), 65);
//! ```

pub mod composer;
pub mod palette;
pub mod raster;

use serde::Serialize;

use crate::error::CardcodeError;
use crate::symbol::{BitPattern, EncodedSymbol, SymbolRequest};

pub use composer::{ComposedImage, TileRef, compose, compose_with};
pub use palette::{Tile, TilePalette};
pub use raster::{rasterize, to_png};

/// An encoded symbol together with its tile composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub symbol: EncodedSymbol,
    pub image: ComposedImage,
}

/// Encode and compose a request.
///
/// Fails with `UnsupportedFormat`, `InvalidDimensions` or the encoder's
/// error; no image is produced in any failure case.
pub fn render(request: &SymbolRequest) -> Result<Rendered, CardcodeError> {
    let format = request.format()?;
    let (module_width_px, height_px) = request.dimensions(format)?;
    let symbol = crate::symbol::encode(format, &request.value)?;
    symbol_width_px(&symbol.bits.padded(palette::TILE_MODULES), module_width_px).ok_or(
        CardcodeError::InvalidDimensions {
            module_width_px,
            height_px,
        },
    )?;
    let image = compose(&symbol.bits, module_width_px, height_px);
    log::trace!(
        "Rendered {} {:?}: {} modules, {} tiles",
        format,
        symbol.display_text,
        symbol.bits.len(),
        image.len()
    );
    Ok(Rendered { symbol, image })
}

/// Pixel width of `bits` drawn at `module_width_px`, if it fits in a `u32`.
pub(crate) fn symbol_width_px(bits: &BitPattern, module_width_px: u32) -> Option<u32> {
    u32::try_from(bits.len())
        .ok()
        .and_then(|modules| modules.checked_mul(module_width_px))
}

/// Text to show under the barcode area for `request`.
///
/// The encoded display text when the value renders; otherwise the raw value,
/// so a card whose code cannot be drawn still shows its number.
pub fn display_text(request: &SymbolRequest) -> String {
    match request.encode() {
        Ok(symbol) => symbol.display_text,
        Err(e) => {
            log::debug!("No barcode for {:?}: {}", request.value, e);
            request.value.clone()
        }
    }
}
