//! Complete CTX stream: primary header, continuation headers and pixels

use crate::ctx::error::{CtxError, Result};
use crate::ctx::header::{CtxHeader, HEADER_SIZE, HeaderPolicy};
use crate::ctx::validate::{SUPPORTED_BIT_DEPTH, validate_header_fields, validate_pixel_range};
use crate::pixels::{PixelBuffer, Sample};
use tracing::{debug, trace, warn};

/// Complete CTX stream with legacy per-frame framing
///
/// The first header is authoritative: frame count, geometry and annotation
/// all come from it. Continuation headers are kept exactly as stored so that
/// files written by other tools rebuild byte-for-byte.
///
/// Binary layout: (Header → width*height pixels) × frame count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtxStream {
    /// Header of the first frame
    pub header: CtxHeader,
    /// Headers of frames 1.., in stream order
    pub continuation_headers: Vec<CtxHeader>,
    /// Pixels of all frames, frame-major then row-major
    pub pixels: Vec<u8>,
}

impl CtxStream {
    /// Parse a CTX stream from binary data
    ///
    /// The first header's annotation must be valid UTF-8. Sample values are
    /// not range-checked; stored data is trusted.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(CtxError::TruncatedInput {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let header = CtxHeader::parse(data)?;
        // Annotation must be text even when the caller never asks for it
        header.annotation()?;
        header.validate()?;

        let frames = header.frame_count();
        let bytes_per_frame = header.bytes_per_frame();
        let expected = frames as u64 * bytes_per_frame as u64;
        if data.len() as u64 != expected {
            return Err(CtxError::SizeMismatch {
                frames: frames as u64,
                bytes_per_frame: bytes_per_frame as u64,
                expected,
                actual: data.len() as u64,
            });
        }

        debug!(
            "Parsing CTX stream: {} frame(s) of {}x{}",
            frames, header.width, header.height
        );

        let mut continuation_headers = Vec::with_capacity(frames - 1);
        let mut pixels = Vec::with_capacity(frames * header.frame_size());
        for (index, window) in data.chunks_exact(bytes_per_frame).enumerate() {
            if index > 0 {
                let embedded = CtxHeader::parse(window)?;
                if !embedded.same_layout(&header) || embedded.frame_count_minus_one != 0 {
                    warn!(
                        "Frame {} header disagrees with the first header ({:?} vs {:?}), using the first",
                        index, embedded, header
                    );
                }
                continuation_headers.push(embedded);
            }
            trace!("Frame {} at offset {}", index, index * bytes_per_frame);
            pixels.extend_from_slice(&window[HEADER_SIZE..]);
        }

        Ok(Self {
            header,
            continuation_headers,
            pixels,
        })
    }

    /// Build the stream to binary data
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let frame_size = self.header.frame_size();
        let mut buffer = Vec::with_capacity(self.header.frame_count() * (HEADER_SIZE + frame_size));
        let headers = std::iter::once(&self.header).chain(&self.continuation_headers);
        for (header, frame) in headers.zip(self.pixels.chunks_exact(frame_size)) {
            buffer.extend_from_slice(&header.build()?);
            buffer.extend_from_slice(frame);
        }

        debug!(
            "Built CTX stream: {} frame(s), {} bytes",
            self.header.frame_count(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Validate stream consistency
    pub fn validate(&self) -> Result<()> {
        self.header.validate()?;

        let frames = self.header.frame_count();
        if self.continuation_headers.len() + 1 != frames {
            return Err(CtxError::FrameCountMismatch {
                expected: frames,
                actual: self.continuation_headers.len() + 1,
            });
        }

        let expected = frames * self.header.frame_size();
        if self.pixels.len() != expected {
            return Err(CtxError::ShapeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }

        Ok(())
    }

    /// Build a stream from a rank 2 or rank 3 buffer
    ///
    /// Samples are rounded to the nearest integer (ties to even), checked
    /// against `[128, 255]` and narrowed to u8. Frame 0 gets the primary
    /// header, every later frame a continuation header.
    pub fn from_pixels<T: Sample>(buffer: &PixelBuffer<T>, annotation: &str) -> Result<Self> {
        let (frames, height, width) = buffer.frame_geometry()?;
        if frames == 0 {
            return Err(CtxError::NoFrames);
        }

        let rounded: Vec<f64> = buffer
            .samples()
            .iter()
            .map(|s| s.round_to_nearest())
            .collect();
        validate_pixel_range(&rounded)?;
        let pixels: Vec<u8> = rounded.into_iter().map(|v| v as u8).collect();

        validate_header_fields(
            width,
            height,
            frames - 1,
            SUPPORTED_BIT_DEPTH,
        )?;

        // Validated above: every field fits in u16
        let primary = CtxHeader::new(
            annotation,
            width as u16,
            height as u16,
            (frames - 1) as u16,
        )?;
        let continuation_headers = (1..frames)
            .map(|index| HeaderPolicy::for_frame(index).apply(&primary))
            .collect();

        Ok(Self {
            header: primary,
            continuation_headers,
            pixels,
        })
    }

    /// Convert into a pixel buffer
    ///
    /// Single-frame streams collapse to rank 2 unless
    /// `keep_single_frame_dimension` is set.
    pub fn into_pixels(self, keep_single_frame_dimension: bool) -> Result<PixelBuffer<u8>> {
        let frames = self.header.frame_count();
        let height = usize::from(self.header.height);
        let width = usize::from(self.header.width);

        if frames == 1 && !keep_single_frame_dimension {
            PixelBuffer::frame(height, width, self.pixels)
        } else {
            PixelBuffer::stack(frames, height, width, self.pixels)
        }
    }

    /// Annotation of the first header
    pub fn annotation(&self) -> Result<String> {
        self.header.annotation()
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.header.frame_count()
    }

    /// Pixels of one frame
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        if index >= self.frame_count() {
            return None;
        }
        let frame_size = self.header.frame_size();
        self.pixels
            .get(index * frame_size..(index + 1) * frame_size)
    }

    /// Headers of all frames in stream order
    pub fn headers(&self) -> impl Iterator<Item = &CtxHeader> {
        std::iter::once(&self.header).chain(&self.continuation_headers)
    }
}

impl crate::CtxFormat for CtxStream {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Self::parse(data).map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        self.build()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }
}
