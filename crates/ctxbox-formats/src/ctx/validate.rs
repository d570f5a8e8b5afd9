//! Structural checks on header fields and sample ranges
//!
//! Both checks are pure predicates. Decoding runs only the header check;
//! the sample-range check guards what gets encoded and what gets mapped
//! through a LUT.

use crate::ctx::error::{CtxError, Result};
use crate::pixels::Sample;

/// The only bit depth this revision of the format supports
pub const SUPPORTED_BIT_DEPTH: u16 = 8;

/// Smallest valid sample value
pub const MIN_SAMPLE: u8 = 128;

/// Largest valid sample value
pub const MAX_SAMPLE: u8 = 255;

/// Validate the geometry fields of a header
///
/// Fields are taken as `usize` so that encode can check buffer shapes before
/// narrowing them into the u16 header fields.
///
/// `frame_count_minus_one == 1` is never valid: a two-frame stream has no
/// legacy header representation.
pub fn validate_header_fields(
    width: usize,
    height: usize,
    frame_count_minus_one: usize,
    bit_depth: u16,
) -> Result<()> {
    if bit_depth != SUPPORTED_BIT_DEPTH {
        return Err(CtxError::UnsupportedBitDepth(bit_depth));
    }

    let max = usize::from(u16::MAX);
    if width == 0 || height == 0 || width > max || height > max {
        return Err(CtxError::InvalidDimensions { width, height });
    }

    if frame_count_minus_one == 1 || frame_count_minus_one > max {
        return Err(CtxError::InvalidFrameCount(frame_count_minus_one));
    }

    Ok(())
}

/// Validate that every sample lies in `[128, 255]`
///
/// Non-finite values are rejected as well.
pub fn validate_pixel_range<T: Sample>(samples: &[T]) -> Result<()> {
    let range = f64::from(MIN_SAMPLE)..=f64::from(MAX_SAMPLE);
    match samples
        .iter()
        .map(|s| s.to_f64())
        .enumerate()
        .find(|(_, v)| !range.contains(v))
    {
        Some((index, value)) => Err(CtxError::OutOfRangeSample { index, value }),
        None => Ok(()),
    }
}
