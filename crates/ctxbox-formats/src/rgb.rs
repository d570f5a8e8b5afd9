//! Mapping decoded CTX samples to RGB through a LUT
//!
//! Output keeps the input shape and appends a channel axis of 3, so a
//! `[height, width]` frame becomes `[height, width, 3]` and a
//! `[frames, height, width]` stack becomes `[frames, height, width, 3]`.

use crate::ctx::error::CtxError;
use crate::ctx::validate::validate_pixel_range;
use crate::lut::error::LutError;
use crate::lut::store::{DEFAULT_LUT_NAME, LutProvider, LutStore};
use crate::lut::table::{LUT_CHANNELS, Lut};
use crate::pixels::PixelBuffer;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when mapping samples to RGB
#[derive(Debug, Error)]
pub enum RgbError {
    /// Input samples failed validation
    #[error(transparent)]
    Pixels(#[from] CtxError),

    /// Default LUT could not be resolved
    #[error(transparent)]
    Lut(#[from] LutError),
}

/// Result type alias for RGB mapping
pub type Result<T> = std::result::Result<T, RgbError>;

/// Map samples to RGB with `lut`, or the built-in `default-grayscale` when `None`
///
/// The default resolves by name through [`RgbMapper::builtin`].
pub fn map_to_rgb(buffer: &PixelBuffer<u8>, lut: Option<&Lut>) -> Result<PixelBuffer<u8>> {
    match lut {
        Some(lut) => apply_lut(buffer, lut),
        None => RgbMapper::builtin().map(buffer, None),
    }
}

/// RGB mapper resolving its default LUT from a provider
///
/// ```rust
/// use ctxbox_formats::pixels::PixelBuffer;
/// use ctxbox_formats::rgb::RgbMapper;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mapper = RgbMapper::builtin();
/// let frame = PixelBuffer::frame(1, 2, vec![128u8, 255])?;
/// let rgb = mapper.map(&frame, None)?;
/// assert_eq!(rgb.dims(), &[1, 2, 3]);
/// assert_eq!(rgb.samples(), &[0, 0, 0, 255, 255, 255]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RgbMapper<P: LutProvider = LutStore> {
    provider: P,
    default_lut: String,
}

impl<P: LutProvider> RgbMapper<P> {
    /// Create a mapper whose default LUT is `default-grayscale` from `provider`
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            default_lut: DEFAULT_LUT_NAME.to_string(),
        }
    }

    /// Use another name for the default LUT
    #[must_use]
    pub fn with_default_lut(mut self, name: impl Into<String>) -> Self {
        self.default_lut = name.into();
        self
    }

    /// Name of the default LUT
    pub fn default_lut_name(&self) -> &str {
        &self.default_lut
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Map samples with `lut`, or the provider's default LUT when `None`
    pub fn map(&self, buffer: &PixelBuffer<u8>, lut: Option<&Lut>) -> Result<PixelBuffer<u8>> {
        match lut {
            Some(lut) => apply_lut(buffer, lut),
            None => {
                let lut = self.provider.require_lut(&self.default_lut)?;
                apply_lut(buffer, &lut)
            }
        }
    }

    /// Map samples with a LUT looked up by name
    pub fn map_named(&self, buffer: &PixelBuffer<u8>, name: &str) -> Result<PixelBuffer<u8>> {
        let lut = self.provider.require_lut(name)?;
        apply_lut(buffer, &lut)
    }
}

impl RgbMapper {
    /// Mapper over the built-in in-memory [`LutStore`]
    pub fn builtin() -> Self {
        Self::new(LutStore::new())
    }
}

impl Default for RgbMapper {
    fn default() -> Self {
        Self::builtin()
    }
}

fn apply_lut(buffer: &PixelBuffer<u8>, lut: &Lut) -> Result<PixelBuffer<u8>> {
    validate_pixel_range(buffer.samples())?;

    let entries = lut.entries();
    let mut rgb = Vec::with_capacity(buffer.len() * LUT_CHANNELS);
    for &sample in buffer.samples() {
        // Range checked above
        rgb.extend_from_slice(&entries[usize::from(sample - 128)]);
    }

    let mut dims = buffer.dims().to_vec();
    dims.push(LUT_CHANNELS);
    debug!("Mapped {} samples to RGB, dims {:?}", buffer.len(), dims);

    Ok(PixelBuffer::new(dims, rgb)?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_tone() -> Lut {
        let mut entries = [[0u8; 3]; 128];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = if i < 64 { [255, 0, 0] } else { [0, 0, 255] };
        }
        Lut::new(entries)
    }

    #[test]
    fn test_map_with_explicit_lut() {
        let frame = PixelBuffer::frame(1, 3, vec![128u8, 191, 192]).unwrap();
        let rgb = map_to_rgb(&frame, Some(&two_tone())).expect("Should map");

        assert_eq!(rgb.dims(), &[1, 3, 3]);
        assert_eq!(rgb.samples(), &[255, 0, 0, 255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_map_default_lut() {
        let stack = PixelBuffer::stack(2, 1, 1, vec![128u8, 255]).unwrap();
        let rgb = map_to_rgb(&stack, None).unwrap();

        assert_eq!(rgb.dims(), &[2, 1, 1, 3]);
        assert_eq!(rgb.get(&[0, 0, 0, 1]), Some(0));
        assert_eq!(rgb.get(&[1, 0, 0, 2]), Some(255));

        // Resolved by name from the built-in store
        let store = LutStore::new();
        let named = store.require_lut(DEFAULT_LUT_NAME).unwrap();
        assert_eq!(rgb, map_to_rgb(&stack, Some(&named)).unwrap());
    }

    #[test]
    fn test_map_rejects_reserved_samples() {
        let frame = PixelBuffer::frame(1, 2, vec![200u8, 127]).unwrap();
        assert!(matches!(
            map_to_rgb(&frame, None),
            Err(RgbError::Pixels(CtxError::OutOfRangeSample { index: 1, .. }))
        ));
    }

    #[test]
    fn test_mapper_uses_provider_default() {
        let mut store = LutStore::empty();
        store.insert("two-tone", two_tone());
        let mapper = RgbMapper::new(store).with_default_lut("two-tone");
        assert_eq!(mapper.default_lut_name(), "two-tone");

        let frame = PixelBuffer::frame(1, 1, vec![255u8]).unwrap();
        let rgb = mapper.map(&frame, None).unwrap();
        assert_eq!(rgb.samples(), &[0, 0, 255]);

        // An explicit LUT wins over the provider
        let rgb = mapper.map(&frame, Some(&Lut::default_grayscale())).unwrap();
        assert_eq!(rgb.samples(), &[255, 255, 255]);
    }

    #[test]
    fn test_mapper_missing_default() {
        let mapper = RgbMapper::new(LutStore::empty());
        let frame = PixelBuffer::frame(1, 1, vec![200u8]).unwrap();
        assert!(matches!(
            mapper.map(&frame, None),
            Err(RgbError::Lut(LutError::NotFound(_)))
        ));
        assert!(mapper.map_named(&frame, "jet").is_err());
    }

    #[test]
    fn test_default_mapper_matches_free_function() {
        let frame = PixelBuffer::frame(2, 2, vec![128u8, 160, 200, 255]).unwrap();
        let mapper: RgbMapper = RgbMapper::default();
        assert_eq!(
            mapper.map(&frame, None).unwrap(),
            map_to_rgb(&frame, None).unwrap()
        );
        assert!(mapper.provider().contains(DEFAULT_LUT_NAME).unwrap());
        assert_eq!(
            RgbMapper::builtin().map(&frame, None).unwrap(),
            mapper.map(&frame, None).unwrap()
        );
    }
}
