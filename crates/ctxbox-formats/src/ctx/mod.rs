//! CTX image-sequence format
//!
//! A CTX stream holds one or more 8-bit grayscale frames plus a short text
//! annotation. Every frame is preceded by its own 18-byte header (legacy
//! framing); only the first header is authoritative.
//!
//! # Format Overview
//!
//! - No magic; all multi-byte integers little-endian
//! - Header: 10-byte NUL-padded annotation, then u16 bit depth (always 8),
//!   width, height and frame count minus one
//! - The first header carries `frame count - 1`; every later header carries
//!   `0` (continuation header). A value of `1` is never valid.
//! - Total length is exactly `frames * (18 + width * height)`
//! - Valid samples lie in `[128, 255]`
//!
//! The frame count field of `0` is ambiguous: it marks both a single-frame
//! stream and a continuation frame. Decoding resolves it by trusting only
//! the first header and the total length.
//!
//! # Usage
//!
//! ```rust
//! use ctxbox_formats::ctx::{self, DecodeOptions};
//! use ctxbox_formats::pixels::PixelBuffer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = PixelBuffer::from_rows(&[vec![128u8, 255], vec![200, 150]])?;
//! let data = ctx::encode(&frame, "hi")?;
//! assert_eq!(data.len(), 18 + 4);
//!
//! let decoded = ctx::decode(&data, DecodeOptions::new().return_annotation(true))?;
//! assert_eq!(decoded.pixels, frame);
//! assert_eq!(decoded.annotation.as_deref(), Some("hi"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod header;
pub mod stream;
pub mod validate;

// Re-export main types
pub use builder::CtxStreamBuilder;
pub use codec::{DecodeOptions, Decoded, decode, encode};
pub use error::{CtxError, Result};
pub use header::{
    ANNOTATION_SIZE, CtxHeader, HEADER_SIZE, HeaderFields, HeaderPolicy, decode_header,
    encode_header,
};
pub use stream::CtxStream;
pub use validate::{
    MAX_SAMPLE, MIN_SAMPLE, SUPPORTED_BIT_DEPTH, validate_header_fields, validate_pixel_range,
};
