use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkydiskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No image data for {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Expected 3 channels, got {0}")]
    InvalidChannelCount(usize),

    #[error("Percent cutoff must be in (0, 100), got {0}")]
    InvalidCutoff(f32),

    #[error("Disk diameter must be positive")]
    InvalidDiameter,

    #[error("Output frame is {actual_width}x{actual_height}, expected {expected}x{expected}")]
    OutputSizeMismatch {
        expected: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Invalid frame range {first}..={last}")]
    InvalidFrameRange { first: u32, last: u32 },

    #[error("Invalid filename pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, SkydiskError>;
