//! # cardcode - Offline Loyalty-Card Barcodes
//!
//! cardcode is the barcode engine behind a loyalty-card organizer. It
//! provides:
//!
//! - **Encoders**: bit-exact EAN-13 and Code128 Subset B
//! - **Tile composition**: every 5-module micro-pattern pre-rasterized once,
//!   so any symbol is drawn by lookup and concatenation
//! - **Direct rasterization**: bars as filled rectangles, with PNG output
//!
//! Everything is a pure function of its inputs: no I/O and no shared mutable
//! state. The lookup tables are read-only.
//!
//! ## Quick Start
//!
//! ```
//! use cardcode::{
//!     render::{self, TilePalette},
//!     symbol::{Format, SymbolRequest},
//! };
//!
//! let request = SymbolRequest::new("AB12", Format::Code128).height(40);
//! let rendered = render::render(&request)?;
//!
//! assert_eq!(rendered.symbol.checksum, 19);
//! assert_eq!(rendered.symbol.display_text, "AB12");
//!
//! // Draw the tiles into one bitmap and encode it
//! let bitmap = rendered.image.to_image(TilePalette::shared());
//! let png = render::to_png(&bitmap)?;
//! assert!(!png.is_empty());
//!
//! # Ok::<(), cardcode::CardcodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`symbol`] | Formats, requests and the EAN-13 / Code128-B encoders |
//! | [`render`] | Tile palette, composer and rasterizer |
//! | [`error`] | Error types |

pub mod error;
pub mod render;
pub mod symbol;

// Re-exports for convenience
pub use error::CardcodeError;
pub use render::{ComposedImage, Rendered, TilePalette, compose, render};
pub use symbol::{BitPattern, EncodedSymbol, Format, SymbolRequest, encode};
