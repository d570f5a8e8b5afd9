//! Shared assertions for CTX and LUT tests

use crate::CtxFormat;
use crate::ctx::codec::{DecodeOptions, decode, encode};
use std::fmt::Debug;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
    left.iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .or_else(|| (left.len() != right.len()).then_some(left.len().min(right.len())))
}

/// Build `value`, parse the bytes back and compare the values
pub fn test_round_trip<T>(value: &T) -> TestResult
where
    T: CtxFormat + PartialEq + Debug,
{
    let parsed = T::parse(&value.build()?)?;
    if &parsed != value {
        return Err(format!("value changed through build/parse: {value:?} -> {parsed:?}").into());
    }
    Ok(())
}

/// Parse `data` and rebuild it, requiring the exact same bytes
///
/// Stricter than a value round-trip: legacy continuation headers and every
/// padding byte must survive.
pub fn test_bytes_preserved<T: CtxFormat>(data: &[u8]) -> TestResult {
    let rebuilt = T::parse(data)?.build()?;
    match first_difference(data, &rebuilt) {
        None => Ok(()),
        Some(offset) => Err(format!(
            "rebuilt bytes differ at offset {offset} ({} vs {} bytes)",
            data.len(),
            rebuilt.len()
        )
        .into()),
    }
}

/// Decode a CTX stream to pixels and encode it again, requiring the same bytes
///
/// Holds for any stream written with clean continuation headers.
pub fn test_codec_identity(data: &[u8]) -> TestResult {
    let options = DecodeOptions::new()
        .return_annotation(true)
        .keep_single_frame_dimension(true);
    let decoded = decode(data, options)?;
    let annotation = decoded.annotation.unwrap_or_default();
    let reencoded = encode(&decoded.pixels, &annotation)?;
    match first_difference(data, &reencoded) {
        None => Ok(()),
        Some(offset) => Err(format!("re-encoded stream differs at offset {offset}").into()),
    }
}

/// Succeed only if parsing `data` fails
pub fn test_rejected<T: CtxFormat>(data: &[u8]) -> TestResult {
    if T::parse(data).is_ok() {
        return Err(format!("{} bytes parsed but should have been rejected", data.len()).into());
    }
    Ok(())
}

/// Assert a value survives build then parse
#[macro_export]
macro_rules! assert_round_trip {
    ($value:expr) => {
        $crate::test_utils::test_round_trip(&$value).expect("Round-trip should succeed")
    };
}

/// Assert parse then build reproduces the input bytes
#[macro_export]
macro_rules! assert_bytes_preserved {
    ($type:ty, $data:expr) => {
        $crate::test_utils::test_bytes_preserved::<$type>($data)
            .expect("Rebuilt bytes should match input")
    };
}

/// Assert decode then encode reproduces a CTX stream
#[macro_export]
macro_rules! assert_codec_identity {
    ($data:expr) => {
        $crate::test_utils::test_codec_identity($data).expect("Re-encoded stream should match")
    };
}

/// Assert parsing fails
#[macro_export]
macro_rules! assert_rejected {
    ($type:ty, $data:expr) => {
        $crate::test_utils::test_rejected::<$type>($data).expect("Data should be rejected")
    };
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ctx::stream::CtxStream;
    use crate::pixels::PixelBuffer;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(first_difference(&[1, 2, 3], &[1, 9, 3]), Some(1));
        assert_eq!(first_difference(&[1, 2], &[1, 2, 3]), Some(2));
    }

    #[test]
    fn test_codec_identity_detects_legacy_headers() {
        let stack = PixelBuffer::stack(3, 1, 1, vec![130u8, 131, 132]).unwrap();
        let mut data = encode(&stack, "id").unwrap();
        test_codec_identity(&data).expect("Clean stream should re-encode identically");
        test_bytes_preserved::<CtxStream>(&data).expect("Clean stream should rebuild");

        // A continuation header repeating the frame count only survives the
        // structured view
        data[19 + 16] = 2;
        assert!(test_codec_identity(&data).is_err());
        test_bytes_preserved::<CtxStream>(&data).expect("Stored headers should be kept");
    }

    #[test]
    fn test_rejected_helper() {
        test_rejected::<CtxStream>(&[0u8; 5]).expect("Short input should be rejected");
        let data = encode(&PixelBuffer::frame(1, 1, vec![200u8]).unwrap(), "").unwrap();
        assert!(test_rejected::<CtxStream>(&data).is_err());
    }
}
