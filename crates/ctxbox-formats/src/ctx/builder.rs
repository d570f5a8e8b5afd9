//! Builder for assembling CTX streams frame by frame

use crate::ctx::error::{CtxError, Result};
use crate::ctx::stream::CtxStream;
use crate::pixels::PixelBuffer;

/// Builder for constructing `CtxStream` instances
///
/// Collects frames of identical geometry and derives the primary and
/// continuation headers at build time.
pub struct CtxStreamBuilder {
    annotation: String,
    width: usize,
    height: usize,
    frames: Vec<Vec<u8>>,
}

impl CtxStreamBuilder {
    /// Create a new builder for frames of `width` x `height` samples
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            annotation: String::new(),
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// Set the annotation stored in every header
    #[must_use]
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Append a frame of row-major samples
    #[must_use]
    pub fn add_frame(mut self, pixels: Vec<u8>) -> Self {
        self.frames.push(pixels);
        self
    }

    /// Build the final `CtxStream`
    ///
    /// Fails when a frame has the wrong number of samples, when no frame
    /// was added, or when the frames fail the usual header and range checks.
    pub fn build(self) -> Result<CtxStream> {
        if self.frames.is_empty() {
            return Err(CtxError::NoFrames);
        }

        let frame_size = self.width * self.height;
        let mut samples = Vec::with_capacity(self.frames.len() * frame_size);
        for frame in &self.frames {
            if frame.len() != frame_size {
                return Err(CtxError::ShapeMismatch {
                    expected: frame_size,
                    actual: frame.len(),
                });
            }
            samples.extend_from_slice(frame);
        }

        let buffer = PixelBuffer::stack(self.frames.len(), self.height, self.width, samples)?;
        let stream = CtxStream::from_pixels(&buffer, &self.annotation)?;

        stream.validate()?;

        Ok(stream)
    }
}
