//! Buffer-level decode and encode entry points

use crate::ctx::error::Result;
use crate::ctx::stream::CtxStream;
use crate::pixels::{PixelBuffer, Sample};
use tracing::debug;

/// Options controlling [`decode`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Also return the annotation of the first header
    pub return_annotation: bool,
    /// Keep the leading frame axis on single-frame streams
    pub keep_single_frame_dimension: bool,
}

impl DecodeOptions {
    /// Default options: no annotation, single frames collapse to rank 2
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the annotation is returned
    #[must_use]
    pub fn return_annotation(mut self, enabled: bool) -> Self {
        self.return_annotation = enabled;
        self
    }

    /// Set whether single-frame streams keep their frame axis
    #[must_use]
    pub fn keep_single_frame_dimension(mut self, enabled: bool) -> Self {
        self.keep_single_frame_dimension = enabled;
        self
    }
}

/// Result of [`decode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Rank 2 (single frame) or rank 3 (frames, rows, columns) samples
    pub pixels: PixelBuffer<u8>,
    /// Annotation, present when requested
    pub annotation: Option<String>,
}

/// Decode a complete CTX byte stream
pub fn decode(data: &[u8], options: DecodeOptions) -> Result<Decoded> {
    let stream = CtxStream::parse(data)?;
    let annotation = if options.return_annotation {
        Some(stream.annotation()?)
    } else {
        None
    };
    let pixels = stream.into_pixels(options.keep_single_frame_dimension)?;

    debug!("Decoded CTX buffer with dims {:?}", pixels.dims());
    Ok(Decoded { pixels, annotation })
}

/// Encode a rank 2 or rank 3 buffer as a CTX byte stream
///
/// Samples are rounded to the nearest integer with ties to even (so `128.5`
/// stores as `128`) and must land in `[128, 255]`.
pub fn encode<T: Sample>(buffer: &PixelBuffer<T>, annotation: &str) -> Result<Vec<u8>> {
    CtxStream::from_pixels(buffer, annotation)?.build()
}
