//! Codecs for CTX grayscale image sequences and their color lookup tables
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format packing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::float_cmp)] // Sample range checks compare exact integers
#![allow(clippy::cast_precision_loss)] // Sample widening to f64
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate provides symmetric (parser and builder) implementations for the
//! CTX image-sequence format and the 128-entry color lookup table (LUT) used
//! to render CTX imagery as RGB.
//!
//! # Supported Formats
//!
//! - **CTX**: multi-frame 8-bit grayscale stream, every frame carrying its
//!   own 18-byte little-endian header (legacy framing)
//! - **LUT**: 128 RGB entries stored as 128 rows of four little-endian u16
//!   words
//!
//! # Data Flow
//!
//! ```text
//! bytes -> ctx::decode -> PixelBuffer<u8> (+ annotation)
//!                              |
//!                              v
//!                    rgb::map_to_rgb (Lut) -> PixelBuffer<u8> [.., 3]
//!
//! PixelBuffer<T> + annotation -> ctx::encode -> bytes
//! ```
//!
//! Valid samples lie in `[128, 255]`; sample `s` selects LUT entry `s - 128`.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Whole-Buffer**: No streaming or partial decode, no shared state
//! - **Typed Failures**: Every violated invariant is a distinct error variant
//! - **Round-Trip Guarantee**: parse(build(data)) == data

#![warn(missing_docs)]

/// CTX image-sequence format
///
/// Header codec, field and sample-range validation, the lossless
/// [`ctx::CtxStream`] view and the `decode`/`encode` entry points working on
/// [`pixels::PixelBuffer`]s.
pub mod ctx;
/// Whole-file wrappers around the byte-level codecs
pub mod fs;
/// 128-entry color lookup tables and named LUT providers
pub mod lut;
pub mod pixels;
pub mod rgb;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

/// Common format trait implemented by every on-disk format
pub trait CtxFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
