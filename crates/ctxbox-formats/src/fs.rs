//! Whole-file wrappers around the CTX and LUT codecs
//!
//! These read or write an entire file and forward the bytes; all format
//! logic stays in [`crate::ctx`] and [`crate::lut`].

use crate::ctx::codec::{DecodeOptions, Decoded, decode, encode};
use crate::lut::table::Lut;
use crate::pixels::{PixelBuffer, Sample};
use std::path::Path;
use tracing::debug;

/// Read and decode a CTX file
pub fn load_ctx(path: impl AsRef<Path>, options: DecodeOptions) -> crate::ctx::Result<Decoded> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    decode(&data, options)
}

/// Encode a buffer and write it as a CTX file
///
/// Nothing is written when encoding fails.
pub fn save_ctx<T: Sample>(
    path: impl AsRef<Path>,
    buffer: &PixelBuffer<T>,
    annotation: &str,
) -> crate::ctx::Result<()> {
    let path = path.as_ref();
    let data = encode(buffer, annotation)?;
    std::fs::write(path, &data)?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Read and decode a LUT file
pub fn load_lut(path: impl AsRef<Path>) -> crate::lut::Result<Lut> {
    let data = std::fs::read(path.as_ref())?;
    Lut::parse(&data)
}

/// Encode a LUT and write it to a file
pub fn save_lut(path: impl AsRef<Path>, lut: &Lut) -> crate::lut::Result<()> {
    std::fs::write(path.as_ref(), lut.build()?)?;
    Ok(())
}
