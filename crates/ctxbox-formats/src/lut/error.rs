//! Error types for the LUT format

use thiserror::Error;

/// Errors that can occur when parsing, building or resolving LUTs
#[derive(Debug, Error)]
pub enum LutError {
    /// LUT data is not exactly 1024 bytes
    #[error("Malformed LUT: expected {expected} bytes, got {actual}")]
    MalformedLut {
        /// Required size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Table is not 128 rows of 3 channels
    #[error("Invalid LUT shape: expected {expected} values, got {actual}")]
    InvalidShape {
        /// Required number of values
        expected: usize,
        /// Values supplied
        actual: usize,
    },

    /// No LUT registered under the requested name
    #[error("LUT not found: {0}")]
    NotFound(String),

    /// Name that cannot be used as a LUT key
    #[error("Invalid LUT name: {0:?}")]
    InvalidName(String),

    /// Binary read error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// Binary write error
    #[error("Binary write error: {0}")]
    BinWrite(String),

    /// IO error while reading or writing a LUT file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for LutError {
    fn from(e: binrw::Error) -> Self {
        Self::BinRead(e.to_string())
    }
}

/// Result type alias for LUT operations
pub type Result<T> = std::result::Result<T, LutError>;
