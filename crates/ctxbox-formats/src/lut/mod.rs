//! Color lookup table format for rendering CTX samples as RGB
//!
//! A LUT holds 128 RGB entries; entry `i` colors sample value `128 + i`.
//!
//! # Format Overview
//!
//! - No header, exactly 1024 bytes
//! - 128 rows of four little-endian u16 words: R, G, B, reserved
//! - Values are 8-bit; the high byte of each word is dropped on read
//! - The reserved word is written as zero and ignored on read
//!
//! # Usage
//!
//! ```rust
//! use ctxbox_formats::lut::{DEFAULT_LUT_NAME, Lut, LutProvider, LutStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LutStore::new();
//! let lut = store.require_lut(DEFAULT_LUT_NAME)?;
//!
//! let data = lut.build()?;
//! assert_eq!(data.len(), 1024);
//! assert_eq!(Lut::parse(&data)?, lut);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod store;
pub mod table;

// Re-export main types
pub use error::{LutError, Result};
pub use store::{
    DEFAULT_LUT_NAME, DirectoryLutStore, DirectoryLutStoreConfig, LUT_DIR_ENV, LutProvider,
    LutStore,
};
pub use table::{LUT_CHANNELS, LUT_DISK_CHANNELS, LUT_ENTRIES, LUT_SIZE, Lut};

/// Decode a 1024-byte LUT
pub fn decode(data: &[u8]) -> Result<Lut> {
    Lut::parse(data)
}

/// Encode a LUT to its 1024-byte on-disk form
pub fn encode(lut: &Lut) -> Result<Vec<u8>> {
    lut.build()
}
