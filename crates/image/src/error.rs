//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The input bytes are not a recognised image
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Target width or height missing or not positive
    #[error("Invalid dimensions: width={width:?}, height={height:?}")]
    InvalidDimensions {
        /// Requested width, if any
        width: Option<u32>,
        /// Requested height, if any
        height: Option<u32>,
    },

    /// Malformed hex color string
    #[error("Invalid color: {0:?}")]
    ColorParse(String),

    /// Unexpected failure while compositing
    #[error("Processing error: {0}")]
    Processing(String),

    /// Decoder or encoder failure
    #[error("Codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Settings blob could not be (de)serialized
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error code for integration with foodshare-style error reporting.
/// Range: 11xxx for image errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageErrorCode {
    /// Not an image
    InvalidInput = 11001,
    /// Bad target dimensions
    InvalidDimensions = 11002,
    /// Bad hex color
    ColorParse = 11003,
    /// Compositing failure
    Processing = 11004,
    /// Codec failure
    Codec = 11005,
    /// Settings (de)serialization failure
    Settings = 11006,
    /// IO failure
    Io = 11007,
}

impl ImageError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ImageErrorCode {
        match self {
            ImageError::InvalidInput(_) => ImageErrorCode::InvalidInput,
            ImageError::InvalidDimensions { .. } => ImageErrorCode::InvalidDimensions,
            ImageError::ColorParse(_) => ImageErrorCode::ColorParse,
            ImageError::Processing(_) => ImageErrorCode::Processing,
            ImageError::Codec(_) => ImageErrorCode::Codec,
            ImageError::Settings(_) => ImageErrorCode::Settings,
            ImageError::Io(_) => ImageErrorCode::Io,
        }
    }

    /// True for errors the caller should surface before any pixel work.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImageError::InvalidInput(_) | ImageError::InvalidDimensions { .. }
        )
    }
}
