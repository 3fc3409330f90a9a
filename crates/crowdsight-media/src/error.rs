//! Error types for media operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while decoding, annotating or persisting images.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The uploaded bytes are not a decodable raster image. Maps to a
    /// bad-request failure at the API boundary.
    #[error("Image decode failed: {0}")]
    Decode(image::ImageError),

    #[error("Image encode failed: {0}")]
    Encode(image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
