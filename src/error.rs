//! Error types for palette extraction.

use thiserror::Error;

/// Errors surfaced by palette extraction and image acquisition.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel buffer dimensions do not match the byte length.
    #[error("invalid pixel buffer: {len} bytes for {width}x{height} RGBA")]
    InvalidBuffer {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Actual byte length.
        len: usize,
    },

    /// No opaque pixel was found, so no primary color exists.
    #[error("image has no non-transparent pixels")]
    EmptyBuffer,

    /// An option value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The image could not be decoded.
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The image could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for palette extraction.
pub type Result<T> = std::result::Result<T, Error>;
