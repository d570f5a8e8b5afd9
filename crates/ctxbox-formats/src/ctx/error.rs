//! Error types for the CTX format

use thiserror::Error;

/// Errors that can occur when decoding, encoding or validating CTX data
#[derive(Debug, Error)]
pub enum CtxError {
    /// Fewer bytes than a header were handed to the header codec
    #[error("Malformed header: expected {expected} bytes, got {actual}")]
    MalformedHeader {
        /// Header size
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// Stream is too short to hold even the first header
    #[error("Truncated input: need at least {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Minimum stream size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Stream length disagrees with the geometry in the first header
    #[error(
        "Size mismatch: {frames} frame(s) of {bytes_per_frame} bytes should be {expected} bytes, but is {actual}"
    )]
    SizeMismatch {
        /// Frame count from the first header
        frames: u64,
        /// Header plus pixel bytes per frame
        bytes_per_frame: u64,
        /// Expected total size
        expected: u64,
        /// Actual data size
        actual: u64,
    },

    /// Bit depth other than 8
    #[error("Unsupported bit depth: {0} (only 8 is supported)")]
    UnsupportedBitDepth(u16),

    /// Width or height is zero or does not fit the u16 header field
    #[error("Invalid dimensions: {width}x{height} (each must be 1-65535)")]
    InvalidDimensions {
        /// Frame width in samples
        width: usize,
        /// Frame height in samples
        height: usize,
    },

    /// Frame-count-minus-one value the format cannot represent
    #[error("Invalid frame count field: {0} (must be 0 or 2-65535)")]
    InvalidFrameCount(usize),

    /// Frame stack with a leading axis of zero
    #[error("Buffer holds no frames")]
    NoFrames,

    /// Buffer is neither a single frame nor a frame stack
    #[error("Invalid rank: expected 2 or 3 axes, got {0}")]
    InvalidRank(usize),

    /// Annotation text that cannot be stored or read back
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    /// Sample outside the valid 128-255 range
    #[error("Sample {value} at index {index} is outside the valid range 128-255")]
    OutOfRangeSample {
        /// Flat row-major index of the sample
        index: usize,
        /// Offending value (after rounding, when encoding)
        value: f64,
    },

    /// Sample count does not match the declared shape
    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Samples implied by the shape
        expected: usize,
        /// Samples supplied
        actual: usize,
    },

    /// Number of continuation headers disagrees with the frame count
    #[error("Frame count mismatch: header says {expected} frames, found {actual}")]
    FrameCountMismatch {
        /// Frame count from the primary header
        expected: usize,
        /// Frames actually present
        actual: usize,
    },

    /// Binary read error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// Binary write error
    #[error("Binary write error: {0}")]
    BinWrite(String),

    /// IO error while reading or writing a CTX file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for CtxError {
    fn from(e: binrw::Error) -> Self {
        Self::BinRead(e.to_string())
    }
}

/// Result type alias for CTX operations
pub type Result<T> = std::result::Result<T, CtxError>;
