//! Layout error types

use std::path::PathBuf;

use thiserror::Error;

/// Layout and asset errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Taffy rejected a tree operation
    #[error("layout engine error: {0}")]
    Taffy(String),

    /// A layout node id is not part of the tree
    #[error("unknown layout node")]
    UnknownNode,

    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] ::image::ImageError),

    /// Image file could not be read
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raw pixel buffer does not match its dimensions
    #[error("invalid pixel data length: expected {expected}, got {actual}")]
    PixelLength { expected: usize, actual: usize },

    /// Image has no pixels to crop or scale
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Taffy(err.to_string())
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
