//! # Error Types
//!
//! This module defines error types used throughout the cardcode library.

use thiserror::Error;

/// Main error type for cardcode operations
#[derive(Debug, Error)]
pub enum CardcodeError {
    /// The value cannot be encoded in the requested symbology
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested format is not one of the supported symbologies
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A request asked for a zero or overflowing module width or bar height
    #[error("Invalid dimensions: module width {module_width_px}px, height {height_px}px")]
    InvalidDimensions {
        module_width_px: u32,
        height_px: u32,
    },

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Malformed JSON request
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
