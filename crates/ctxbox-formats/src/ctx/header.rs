//! CTX frame header parsing and building
//!
//! Every frame of a CTX stream starts with the same 18-byte little-endian
//! header:
//!
//! ```text
//! offset 0..10   annotation, NUL-padded UTF-8
//! offset 10..12  bit depth (8)
//! offset 12..14  width
//! offset 14..16  height
//! offset 16..18  frame count minus one
//! ```

use crate::ctx::error::{CtxError, Result};
use crate::ctx::validate::{SUPPORTED_BIT_DEPTH, validate_header_fields};
use binrw::{BinRead, BinWrite};
use std::io::Cursor;

/// Size of one frame header in bytes
pub const HEADER_SIZE: usize = 18;

/// Size of the fixed annotation field in bytes
pub const ANNOTATION_SIZE: usize = 10;

/// Raw CTX frame header as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct CtxHeader {
    /// Annotation bytes, NUL-padded
    pub annotation: [u8; ANNOTATION_SIZE],

    /// Bits per sample, always 8 in valid streams
    pub bit_depth: u16,

    /// Frame width in samples
    pub width: u16,

    /// Frame height in samples
    pub height: u16,

    /// Frame count minus one on the first frame, zero on continuation frames
    pub frame_count_minus_one: u16,
}

impl CtxHeader {
    /// Create a header with an 8-bit depth
    pub fn new(annotation: &str, width: u16, height: u16, frame_count_minus_one: u16) -> Result<Self> {
        Ok(Self {
            annotation: pack_annotation(annotation)?,
            bit_depth: SUPPORTED_BIT_DEPTH,
            width,
            height,
            frame_count_minus_one,
        })
    }

    /// Parse a header from the first 18 bytes of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(CtxError::MalformedHeader {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = Cursor::new(&data[..HEADER_SIZE]);
        Self::read_options(&mut cursor, binrw::Endian::Little, ()).map_err(CtxError::from)
    }

    /// Build the 18-byte header
    pub fn build(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut cursor = Cursor::new([0u8; HEADER_SIZE]);
        self.write_options(&mut cursor, binrw::Endian::Little, ())
            .map_err(|e| CtxError::BinWrite(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Annotation text with all trailing NUL bytes stripped
    pub fn annotation(&self) -> Result<String> {
        unpack_annotation(&self.annotation)
    }

    /// Number of frames announced by this header
    ///
    /// Only meaningful on the first header of a stream; continuation headers
    /// always announce a single frame.
    pub fn frame_count(&self) -> usize {
        usize::from(self.frame_count_minus_one) + 1
    }

    /// Pixel bytes per frame
    pub fn frame_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Header plus pixel bytes per frame
    pub fn bytes_per_frame(&self) -> usize {
        HEADER_SIZE + self.frame_size()
    }

    /// Validate the header fields
    pub fn validate(&self) -> Result<()> {
        validate_header_fields(
            usize::from(self.width),
            usize::from(self.height),
            usize::from(self.frame_count_minus_one),
            self.bit_depth,
        )
    }

    /// Whether two headers describe frames of the same layout
    ///
    /// Compares everything except the frame count field.
    pub fn same_layout(&self, other: &Self) -> bool {
        self.annotation == other.annotation
            && self.bit_depth == other.bit_depth
            && self.width == other.width
            && self.height == other.height
    }
}

/// Which header variant a frame carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// First frame: carries the real frame count
    Primary,
    /// Every later frame: frame count field zeroed
    Continuation,
}

impl HeaderPolicy {
    /// Policy for the frame at `index` in stream order
    pub fn for_frame(index: usize) -> Self {
        if index == 0 {
            Self::Primary
        } else {
            Self::Continuation
        }
    }

    /// Derive the header for this policy from the stream's primary header
    pub fn apply(self, primary: &CtxHeader) -> CtxHeader {
        match self {
            Self::Primary => primary.clone(),
            Self::Continuation => CtxHeader {
                frame_count_minus_one: 0,
                ..primary.clone()
            },
        }
    }
}

/// Header fields with the annotation as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    /// Annotation text, at most 10 bytes once UTF-8 encoded
    pub annotation: String,
    /// Bits per sample
    pub bit_depth: u16,
    /// Frame width in samples
    pub width: u16,
    /// Frame height in samples
    pub height: u16,
    /// Frame count minus one
    pub frame_count_minus_one: u16,
}

/// Encode header fields into 18 bytes
///
/// Field values are written as given; validation is the caller's concern.
pub fn encode_header(fields: &HeaderFields) -> Result<[u8; HEADER_SIZE]> {
    CtxHeader {
        annotation: pack_annotation(&fields.annotation)?,
        bit_depth: fields.bit_depth,
        width: fields.width,
        height: fields.height,
        frame_count_minus_one: fields.frame_count_minus_one,
    }
    .build()
}

/// Decode the first 18 bytes of `data` into header fields
pub fn decode_header(data: &[u8]) -> Result<HeaderFields> {
    let header = CtxHeader::parse(data)?;
    Ok(HeaderFields {
        annotation: header.annotation()?,
        bit_depth: header.bit_depth,
        width: header.width,
        height: header.height,
        frame_count_minus_one: header.frame_count_minus_one,
    })
}

fn pack_annotation(annotation: &str) -> Result<[u8; ANNOTATION_SIZE]> {
    let bytes = annotation.as_bytes();
    if bytes.len() > ANNOTATION_SIZE {
        return Err(CtxError::InvalidAnnotation(format!(
            "{} bytes exceeds the {}-byte field",
            bytes.len(),
            ANNOTATION_SIZE
        )));
    }

    let mut field = [0u8; ANNOTATION_SIZE];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

fn unpack_annotation(field: &[u8; ANNOTATION_SIZE]) -> Result<String> {
    let end = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8(field[..end].to_vec())
        .map_err(|e| CtxError::InvalidAnnotation(format!("not valid UTF-8: {e}")))
}
