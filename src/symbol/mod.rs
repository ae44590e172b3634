//! # Linear Symbologies
//!
//! Encoders that turn a card value into a module pattern.
//!
//! | Format | Input | Output length |
//! |--------|-------|---------------|
//! | [`Format::Ean13`] | 12 digits (extra digits ignored) | 95 modules |
//! | [`Format::Code128`] | any text, Subset B with `?` substitution | `20 + 11·(n+2) + 13` modules |
//!
//! ## Usage
//!
//! ```
//! use cardcode::symbol::{self, Format};
//!
//! let format: Format = "EAN13".parse().unwrap();
//! let symbol = symbol::encode(format, "4006381333931").unwrap();
//! assert_eq!(symbol.display_text, "4006381333931");
//!
//! assert!("qrcode".parse::<Format>().is_err());
//! ```

pub mod bits;
pub mod code128;
pub mod ean13;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CardcodeError;
use crate::render::palette::TILE_MODULES;

pub use bits::{BitPattern, Run, widths_to_bits};

/// Supported linear symbologies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// EAN-13 retail barcode (default for new cards).
    #[default]
    Ean13,
    /// Code 128, character subset B.
    Code128,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Ean13, Format::Code128];

    /// Lowercase name used in requests and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Format::Ean13 => "ean13",
            Format::Code128 => "code128",
        }
    }

    /// Default `(module_width_px, height_px)` for this format.
    pub fn default_dimensions(self) -> (u32, u32) {
        match self {
            Format::Ean13 => (3, 65),
            Format::Code128 => (3, 50),
        }
    }

    /// Short description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Format::Ean13 => "EAN-13, 12 digits plus computed check digit",
            Format::Code128 => "Code 128 subset B, printable ASCII",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = CardcodeError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ean13" => Ok(Format::Ean13),
            "code128" => Ok(Format::Code128),
            _ => Err(CardcodeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Result of encoding one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedSymbol {
    pub format: Format,
    /// Module pattern, quiet zones included where the symbology has them.
    pub bits: BitPattern,
    /// Text to print beneath the bars.
    pub display_text: String,
    /// EAN-13 check digit (0..=9) or Code128 check symbol value (0..=102).
    pub checksum: u8,
}

/// Encode `value` in the given format.
pub fn encode(format: Format, value: &str) -> Result<EncodedSymbol, CardcodeError> {
    match format {
        Format::Ean13 => ean13::encode(value),
        Format::Code128 => Ok(code128::encode(value)),
    }
}

/// Encode with the format given by name, as stored on a card.
pub fn encode_named(format: &str, value: &str) -> Result<EncodedSymbol, CardcodeError> {
    encode(format.parse()?, value)
}

/// A render call as issued by the card UI.
///
/// Deserializes from the JSON shape
/// `{ "value": "...", "format": "ean13", "moduleWidthPx": 3, "heightPx": 65 }`.
/// The format stays a plain string until [`SymbolRequest::format`] so that
/// unknown names are reported as [`CardcodeError::UnsupportedFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRequest {
    pub value: String,
    #[serde(default = "default_format_name")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_width_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_px: Option<u32>,
}

fn default_format_name() -> String {
    Format::default().name().to_string()
}

impl SymbolRequest {
    /// Create a request with the format's default dimensions.
    pub fn new(value: impl Into<String>, format: Format) -> Self {
        Self {
            value: value.into(),
            format: format.name().to_string(),
            module_width_px: None,
            height_px: None,
        }
    }

    /// Create a request from a stored format name, validated at render time.
    pub fn named(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: format.into(),
            module_width_px: None,
            height_px: None,
        }
    }

    /// Set the width of one module in pixels.
    pub fn module_width(mut self, px: u32) -> Self {
        self.module_width_px = Some(px);
        self
    }

    /// Set the bar height in pixels.
    pub fn height(mut self, px: u32) -> Self {
        self.height_px = Some(px);
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, CardcodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The requested format, or `UnsupportedFormat`.
    pub fn format(&self) -> Result<Format, CardcodeError> {
        self.format.parse()
    }

    /// `(module_width_px, height_px)` with format defaults filled in.
    ///
    /// Zero sizes are rejected, as is a module width whose tile width does
    /// not fit in a `u32`.
    pub fn dimensions(&self, format: Format) -> Result<(u32, u32), CardcodeError> {
        let (default_width, default_height) = format.default_dimensions();
        let module_width_px = self.module_width_px.unwrap_or(default_width);
        let height_px = self.height_px.unwrap_or(default_height);
        let tile_width = module_width_px.checked_mul(TILE_MODULES as u32);
        if module_width_px == 0 || height_px == 0 || tile_width.is_none() {
            return Err(CardcodeError::InvalidDimensions {
                module_width_px,
                height_px,
            });
        }
        Ok((module_width_px, height_px))
    }

    /// Encode the requested value.
    pub fn encode(&self) -> Result<EncodedSymbol, CardcodeError> {
        encode(self.format()?, &self.value)
    }
}
