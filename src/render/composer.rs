//! Tile composition.
//!
//! [`compose`] packs a module pattern into a row of palette tiles. The
//! composer never changes bit semantics: reading the tiles back left to
//! right yields the input pattern followed by at most four padding spaces.

use image::{GrayImage, imageops};
use serde::Serialize;

use super::palette::{TILE_HEIGHT, TILE_MODULES, TILE_WIDTH, TilePalette};
use crate::symbol::BitPattern;

/// One placed tile: which palette entry, drawn at what size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRef {
    pub value: u8,
    pub width_px: u32,
    pub height_px: u32,
}

/// An ordered row of tiles that renders a whole symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedImage {
    tiles: Vec<TileRef>,
    module_width_px: u32,
    height_px: u32,
}

/// Compose `bits` using the shared palette.
pub fn compose(bits: &BitPattern, module_width_px: u32, height_px: u32) -> ComposedImage {
    compose_with(TilePalette::shared(), bits, module_width_px, height_px)
}

/// Compose `bits` against an explicit palette.
///
/// Each tile spans five modules, so it is drawn `5 * module_width_px` wide.
pub fn compose_with(
    palette: &TilePalette,
    bits: &BitPattern,
    module_width_px: u32,
    height_px: u32,
) -> ComposedImage {
    let width_px = (TILE_MODULES as u32).saturating_mul(module_width_px);
    let tiles = bits
        .groups(TILE_MODULES)
        .into_iter()
        .map(|group| TileRef {
            value: palette.tile(group).value(),
            width_px,
            height_px,
        })
        .collect();

    ComposedImage {
        tiles,
        module_width_px,
        height_px,
    }
}

impl ComposedImage {
    pub fn tiles(&self) -> &[TileRef] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn module_width_px(&self) -> u32 {
        self.module_width_px
    }

    /// Total width with tiles placed edge to edge, saturating at `u32::MAX`.
    pub fn width_px(&self) -> u32 {
        self.tiles
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.width_px))
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Modules drawn by the tiles, padding included.
    pub fn bits(&self) -> BitPattern {
        self.tiles
            .iter()
            .flat_map(|t| (0..TILE_MODULES).rev().map(move |shift| (t.value >> shift) & 1 == 1))
            .collect()
    }

    /// Concatenate the palette bitmaps, each scaled to its tile size.
    pub fn to_image(&self, palette: &TilePalette) -> GrayImage {
        let mut canvas = GrayImage::new(self.width_px(), self.height_px);
        let mut x = 0i64;
        for tile in &self.tiles {
            let scaled = scale_tile(palette.tile(tile.value).bitmap(), tile.width_px, tile.height_px);
            imageops::replace(&mut canvas, &scaled, x, 0);
            x += i64::from(tile.width_px);
        }
        canvas
    }

    /// Markup produced by the legacy card renderer: one `<img>` per tile
    /// with the tile PNG inlined as a data URI.
    pub fn to_legacy_html(&self, palette: &TilePalette) -> String {
        let mut html = String::new();
        for tile in &self.tiles {
            html.push_str(&format!(
                r#"<img alt="bar" src="{}" width="{}" height="{}">"#,
                palette.tile(tile.value).data_uri(),
                tile.width_px,
                tile.height_px
            ));
        }
        html
    }
}

/// Nearest-neighbour scale that keeps module boundaries on whole pixels
/// whenever `width` is a multiple of the module count.
fn scale_tile(bitmap: &GrayImage, width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let sx = (u64::from(x) * u64::from(TILE_WIDTH) / u64::from(width)) as u32;
        let sy = (u64::from(y) * u64::from(TILE_HEIGHT) / u64::from(height)) as u32;
        *bitmap.get_pixel(sx, sy)
    })
}
