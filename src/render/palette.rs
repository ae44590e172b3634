//! # Tile Palette
//!
//! Every 5-module micro-pattern, pre-rasterized once. A barcode of any length
//! is then drawn by looking up one tile per 5 modules and placing the tiles
//! side by side.
//!
//! ## Tile geometry
//!
//! ```text
//! value 0b10110          pixels (10 x 2, 2 px per module)
//!  1 0 1 1 0       ->    ## .. ## ## ..
//!                        ## .. ## ## ..
//! ```
//!
//! Bars are black (0), spaces white (255). The same tiles also exist as
//! small PNG files inside the legacy card renderer's markup; each [`Tile`]
//! carries the two base64 fragments that distinguish its PNG so that markup
//! can be reproduced byte for byte.

use std::sync::OnceLock;

use image::{GrayImage, Luma};

/// Modules covered by one tile.
pub const TILE_MODULES: usize = 5;

/// Number of distinct tiles (all 5-bit values).
pub const TILE_COUNT: usize = 1 << TILE_MODULES;

/// Pixels per module inside a tile bitmap.
pub const PIXELS_PER_MODULE: u32 = 2;

/// Tile bitmap width in pixels.
pub const TILE_WIDTH: u32 = TILE_MODULES as u32 * PIXELS_PER_MODULE;

/// Tile bitmap height in pixels.
pub const TILE_HEIGHT: u32 = 2;

pub const BAR: Luma<u8> = Luma([0]);
pub const SPACE: Luma<u8> = Luma([255]);

// Legacy PNG: signature, IHDR (10x2, 8-bit gray+alpha) and the start of a
// stored zlib block. Only the scanline bytes vary per tile.
const PNG_HEAD: &str = "iVBORw0KGgoAAAANSUhEUgAAAAoAAAACCAQAAADLaIVbAAAANUlEQVQIHQEqANX/A";
const PNG_MID: &str = "AAAAAgAAAAAAAAAAAAAAAAAAAAAAAAAA";
const PNG_TAIL: &str = "AAAAASUVORK5CYII=";

/// First varying fragment (first scanline), indexed by tile value.
const FRAGMENT_A: [&str; TILE_COUNT] = [
    "f//AAAAAAAAAAAAAAAAAAAA", "f//AAAAAAAAAAAAAAAAAAAB", "f//AAAAAAAAAAAAAAEAAAD/",
    "f//AAAAAAAAAAAAAAEAAAAA", "f//AAAAAAAAAQAAAP8AAAAA", "f//AAAAAAAAAQAAAP8AAAAB",
    "f//AAAAAAAAAQAAAAAAAAD/", "f//AAAAAAAAAQAAAAAAAAAA", "f//AAABAAAA/wAAAAAAAAAA",
    "f//AAABAAAA/wAAAAAAAAAB", "f//AAABAAAA/wAAAAEAAAD/", "f//AAABAAAA/wAAAAEAAAAA",
    "f//AAABAAAAAAAAAP8AAAAA", "f//AAABAAAAAAAAAP8AAAAB", "f//AAABAAAAAAAAAAAAAAD/",
    "f//AAABAAAAAAAAAAAAAAAA", "QD/AAD/AAAAAAAAAAAAAAAA", "QD/AAD/AAAAAAAAAAAAAAAB",
    "QD/AAD/AAAAAAAAAAEAAAD/", "QD/AAD/AAAAAAAAAAEAAAAA", "QD/AAD/AAAAAQAAAP8AAAAA",
    "QD/AAD/AAAAAQAAAP8AAAAB", "QD/AAD/AAAAAQAAAAAAAAD/", "QD/AAD/AAAAAQAAAAAAAAAA",
    "QD/AAAAAAAA/wAAAAAAAAAA", "QD/AAAAAAAA/wAAAAAAAAAB", "SL/AADeAAAA/gAAAAIAAAD+",
    "QD/AAAAAAAA/wAAAAEAAAAA", "QD/AAAAAAAAAAAAAP8AAAAA", "QD/AAAAAAAAAAAAAP8AAAAB",
    "QD/AAAAAAAAAAAAAAAAAAD/", "QD/AAAAAAAAAAAAAAAAAAAA",
];

/// Second varying fragment (zlib Adler-32 and IDAT CRC), indexed by tile value.
const FRAGMENT_B: [&str; TILE_COUNT] = [
    "US0CAuSD38g", "UUYCA7QBErs", "ajEDAm49ReY", "UUoCA+juogg", "bjEDAjQrOn0", "bkoDA3iPVH4",
    "ajUDAt82atY", "UU4CA1nljTg", "cjEDAghkmFU", "ckoDA0TA9lY", "izUEAhrxcbg", "ck4DAxY8F10",
    "bjUDAlvFFR8", "bk4DAxdhexw", "ajkDAr7LFAw", "UVICAyQ+UJI", "TTECAq7UnEM", "TUoCA+Jw8kA",
    "ZjUDAmZGozo", "TU4CA7CME0s", "ajUDAvnk9E4", "ak4DA7VAmk0", "ZjkDAtle3bI", "TVICAxOyzrM",
    "STUCAqHeHtM", "SU4CA+16cNA", "h6QEAZKdo54", "SVICA62zYxM", "RTkCAqx1lb4", "RVICA/z3WM0",
    "QT0CAkdoxRU", "KFYBA46vJCA",
];

/// One pre-rasterized 5-module fragment.
#[derive(Debug, Clone)]
pub struct Tile {
    value: u8,
    bitmap: GrayImage,
}

impl Tile {
    fn new(value: u8) -> Self {
        let modules = modules_of(value);
        let bitmap = GrayImage::from_fn(TILE_WIDTH, TILE_HEIGHT, |x, _| {
            if modules[(x / PIXELS_PER_MODULE) as usize] {
                BAR
            } else {
                SPACE
            }
        });
        Self { value, bitmap }
    }

    /// The 5-bit group this tile draws.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Modules drawn by this tile, left to right.
    pub fn modules(&self) -> [bool; TILE_MODULES] {
        modules_of(self.value)
    }

    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }

    /// The legacy renderer's `data:` URI for this tile.
    pub fn data_uri(&self) -> String {
        let i = usize::from(self.value);
        format!(
            "data:image/png;base64,{}{}{}{}{}",
            PNG_HEAD, FRAGMENT_A[i], PNG_MID, FRAGMENT_B[i], PNG_TAIL
        )
    }
}

/// Immutable lookup table from 5-bit value to [`Tile`].
#[derive(Debug)]
pub struct TilePalette {
    tiles: [Tile; TILE_COUNT],
}

impl TilePalette {
    /// Build all 32 tiles.
    pub fn new() -> Self {
        Self {
            tiles: std::array::from_fn(|value| Tile::new(value as u8)),
        }
    }

    /// Process-wide palette, built on first use.
    pub fn shared() -> &'static TilePalette {
        static PALETTE: OnceLock<TilePalette> = OnceLock::new();
        PALETTE.get_or_init(|| {
            log::debug!("Building {} barcode tiles", TILE_COUNT);
            TilePalette::new()
        })
    }

    /// Tile for `value`, or `None` when it does not fit in 5 bits.
    pub fn get(&self, value: u8) -> Option<&Tile> {
        self.tiles.get(usize::from(value))
    }

    /// Tile for a 5-bit group. Bits above the low five are ignored.
    pub fn tile(&self, value: u8) -> &Tile {
        &self.tiles[usize::from(value) % TILE_COUNT]
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self::new()
    }
}

fn modules_of(value: u8) -> [bool; TILE_MODULES] {
    std::array::from_fn(|i| (value >> (TILE_MODULES - 1 - i)) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_complete() {
        let palette = TilePalette::new();
        assert_eq!(palette.len(), 32);
        for value in 0..32u8 {
            let tile = palette.get(value).expect("missing tile");
            assert_eq!(tile.value(), value);
        }
        assert!(palette.get(32).is_none());
    }

    #[test]
    fn test_tile_pixels_match_modules() {
        let palette = TilePalette::new();
        for tile in palette.iter() {
            let modules = tile.modules();
            assert_eq!(tile.bitmap().dimensions(), (TILE_WIDTH, TILE_HEIGHT));
            for (x, y, px) in tile.bitmap().enumerate_pixels() {
                let expected = if modules[(x / PIXELS_PER_MODULE) as usize] {
                    BAR
                } else {
                    SPACE
                };
                assert_eq!(*px, expected, "tile {} at ({}, {})", tile.value(), x, y);
            }
        }
    }

    #[test]
    fn test_modules_msb_first() {
        assert_eq!(modules_of(0b10110), [true, false, true, true, false]);
        assert_eq!(modules_of(0), [false; 5]);
        assert_eq!(modules_of(31), [true; 5]);
    }

    #[test]
    fn test_shared_palette_is_single_instance() {
        let a = TilePalette::shared() as *const TilePalette;
        let b = TilePalette::shared() as *const TilePalette;
        assert_eq!(a, b);
    }

    #[test]
    fn test_data_uri_shape() {
        let palette = TilePalette::new();
        let uri = palette.tile(0).data_uri();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert!(uri.ends_with("ASUVORK5CYII="));
        // every legacy tile PNG is 110 bytes
        let b64 = uri.trim_start_matches("data:image/png;base64,");
        assert_eq!(b64.len(), 148);
    }
}
