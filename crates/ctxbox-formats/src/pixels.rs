//! Owned, row-major sample buffers
//!
//! [`PixelBuffer`] is the in-memory form of CTX imagery: a dims vector plus
//! a flat, row-major sample vector. A rank 2 buffer is one frame
//! (`[height, width]`), a rank 3 buffer is a stack of frames
//! (`[frames, height, width]`). The RGB mapper appends a trailing channel
//! axis of 3.
//!
//! Samples are generic over [`Sample`] so that callers holding wider or
//! floating-point data can hand it to the encoder, which rounds and narrows.

use crate::ctx::error::{CtxError, Result};
use std::fmt::Debug;

/// A numeric sample type the encoder can round to the 8-bit range
pub trait Sample: Copy + Debug + PartialEq {
    /// Widen the sample to `f64` without rounding
    fn to_f64(self) -> f64;

    /// Round to the nearest integer, ties to even
    fn round_to_nearest(self) -> f64 {
        self.to_f64().round_ties_even()
    }
}

macro_rules! impl_integer_sample {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn round_to_nearest(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, u32, i16, i32, i64);

impl Sample for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Sample for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Row-major buffer of samples with an explicit shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<T = u8> {
    dims: Vec<usize>,
    samples: Vec<T>,
}

impl<T: Sample> PixelBuffer<T> {
    /// Create a buffer, checking that the sample count matches the dims
    pub fn new(dims: Vec<usize>, samples: Vec<T>) -> Result<Self> {
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or(CtxError::ShapeMismatch {
                expected: usize::MAX,
                actual: samples.len(),
            })?;

        if expected != samples.len() {
            return Err(CtxError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self { dims, samples })
    }

    /// Create a single-frame (rank 2) buffer
    pub fn frame(height: usize, width: usize, samples: Vec<T>) -> Result<Self> {
        Self::new(vec![height, width], samples)
    }

    /// Create a frame stack (rank 3) buffer
    pub fn stack(frames: usize, height: usize, width: usize, samples: Vec<T>) -> Result<Self> {
        Self::new(vec![frames, height, width], samples)
    }

    /// Create a rank 2 buffer from nested rows
    ///
    /// All rows must have the same length as the first.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut samples = Vec::with_capacity(rows.len() * width);
        for row in rows {
            if row.len() != width {
                return Err(CtxError::ShapeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            samples.extend_from_slice(row);
        }
        Self::frame(rows.len(), width, samples)
    }

    /// Shape of the buffer, outermost axis first
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Flat row-major samples
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Consume the buffer and return its samples
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interpret the buffer as `(frames, height, width)`
    ///
    /// Rank 2 buffers count as a single frame; any other rank than 2 or 3
    /// fails with [`CtxError::InvalidRank`].
    pub fn frame_geometry(&self) -> Result<(usize, usize, usize)> {
        match *self.dims.as_slice() {
            [height, width] => Ok((1, height, width)),
            [frames, height, width] => Ok((frames, height, width)),
            _ => Err(CtxError::InvalidRank(self.rank())),
        }
    }

    /// Promote a rank 2 buffer to rank 3 with a leading axis of 1
    ///
    /// Buffers of any other rank are returned unchanged.
    pub fn with_frame_axis(mut self) -> Self {
        if self.rank() == 2 {
            self.dims.insert(0, 1);
        }
        self
    }

    /// Samples of one frame, if the buffer is rank 2 or 3 and `index` exists
    pub fn frame_samples(&self, index: usize) -> Option<&[T]> {
        let (frames, height, width) = self.frame_geometry().ok()?;
        if index >= frames {
            return None;
        }
        let frame_len = height * width;
        self.samples
            .get(index * frame_len..(index + 1) * frame_len)
    }

    /// Sample at a multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0usize;
        for (&i, &d) in index.iter().zip(&self.dims) {
            if i >= d {
                return None;
            }
            offset = offset * d + i;
        }
        self.samples.get(offset).copied()
    }
}
