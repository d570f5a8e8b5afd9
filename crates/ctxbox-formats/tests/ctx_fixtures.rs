#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for CTX streams and LUTs using fixture files
//!
//! Fixtures are small legacy-framed files: a single 2x2 frame, a three-frame
//! stack, a stream whose continuation headers repeat the frame count, and a
//! LUT with an inverted ramp.

use ctxbox_formats::CtxFormat;
use ctxbox_formats::ctx::{self, CtxError, CtxStream, DecodeOptions};
use ctxbox_formats::lut::{self, Lut};
use ctxbox_formats::pixels::PixelBuffer;
use ctxbox_formats::rgb::{RgbMapper, map_to_rgb};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

fn read_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

// --- Single frame ---

#[test]
fn ctx_single_frame_decode() {
    let data = read_fixture("ctx/single_2x2_hi.ctx");
    let decoded = ctx::decode(&data, DecodeOptions::new().return_annotation(true))
        .expect("Single frame decode should succeed");

    assert_eq!(decoded.pixels.dims(), &[2, 2]);
    assert_eq!(decoded.pixels.samples(), &[128, 255, 200, 150]);
    assert_eq!(decoded.annotation.as_deref(), Some("hi"));
}

#[test]
fn ctx_single_frame_reencode_matches_fixture() {
    let data = read_fixture("ctx/single_2x2_hi.ctx");
    let frame = PixelBuffer::from_rows(&[vec![128u8, 255], vec![200, 150]]).unwrap();

    assert_eq!(ctx::encode(&frame, "hi").unwrap(), data);
    // Same bytes from a single-frame stack
    assert_eq!(ctx::encode(&frame.with_frame_axis(), "hi").unwrap(), data);
}

// --- Three-frame legacy stack ---

#[test]
fn ctx_three_frame_headers() {
    let data = read_fixture("ctx/legacy_3x4x3_stim01.ctx");
    let stream = CtxStream::parse(&data).expect("Three-frame parse should succeed");

    assert_eq!(stream.frame_count(), 3);
    assert_eq!(stream.header.width, 4);
    assert_eq!(stream.header.height, 3);
    assert_eq!(stream.header.frame_count_minus_one, 2);
    assert_eq!(stream.annotation().unwrap(), "stim01");
    for header in &stream.continuation_headers {
        assert_eq!(header.frame_count_minus_one, 0);
        assert!(header.same_layout(&stream.header));
    }
}

#[test]
fn ctx_three_frame_pixels() {
    let data = read_fixture("ctx/legacy_3x4x3_stim01.ctx");
    let decoded = ctx::decode(&data, DecodeOptions::default()).unwrap();

    assert_eq!(decoded.pixels.dims(), &[3, 3, 4]);
    assert_eq!(decoded.pixels.get(&[0, 0, 0]), Some(128));
    assert_eq!(decoded.pixels.get(&[1, 2, 3]), Some(168 + 11));
    assert_eq!(decoded.pixels.get(&[2, 1, 0]), Some(208 + 4));
}

#[test]
fn ctx_three_frame_round_trip() {
    let data = read_fixture("ctx/legacy_3x4x3_stim01.ctx");
    CtxStream::verify_round_trip(&data).expect("Stream round-trip should verify");

    let decoded = ctx::decode(&data, DecodeOptions::new().return_annotation(true)).unwrap();
    let annotation = decoded.annotation.unwrap();
    assert_eq!(ctx::encode(&decoded.pixels, &annotation).unwrap(), data);
}

#[test]
fn ctx_truncated_and_extended_fixture() {
    let data = read_fixture("ctx/legacy_3x4x3_stim01.ctx");

    let err = ctx::decode(&data[..data.len() - 1], DecodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CtxError::SizeMismatch {
            frames: 3,
            bytes_per_frame: 30,
            expected: 90,
            actual: 89
        }
    ));

    let mut extended = data.clone();
    extended.push(0);
    assert!(matches!(
        ctx::decode(&extended, DecodeOptions::default()),
        Err(CtxError::SizeMismatch { actual: 91, .. })
    ));

    assert!(matches!(
        ctx::decode(&data[..10], DecodeOptions::default()),
        Err(CtxError::TruncatedInput { .. })
    ));
}

// --- Continuation headers written by older tools ---

#[test]
fn ctx_repeated_count_uses_first_header() {
    let data = read_fixture("ctx/legacy_repeated_count.ctx");
    let decoded = ctx::decode(&data, DecodeOptions::default())
        .expect("Odd continuation headers should not fail decode");

    assert_eq!(decoded.pixels.dims(), &[3, 1, 2]);
    assert_eq!(decoded.pixels.samples(), &[200, 210, 201, 211, 202, 212]);
}

#[test]
fn ctx_repeated_count_preserved_by_stream() {
    let data = read_fixture("ctx/legacy_repeated_count.ctx");
    let stream = CtxStream::parse(&data).unwrap();
    assert!(
        stream
            .continuation_headers
            .iter()
            .all(|h| h.frame_count_minus_one == 2)
    );
    assert_eq!(stream.build().unwrap(), data);

    // Re-encoding the pixels writes proper continuation headers
    let reencoded = ctx::encode(&stream.clone().into_pixels(true).unwrap(), "old").unwrap();
    assert_ne!(reencoded, data);
    let restream = CtxStream::parse(&reencoded).unwrap();
    assert_eq!(restream.pixels, stream.pixels);
    assert!(
        restream
            .continuation_headers
            .iter()
            .all(|h| h.frame_count_minus_one == 0)
    );
}

// --- LUT ---

#[test]
fn lut_fixture_decode() {
    let data = read_fixture("lut/inverted_ramp.lut");
    let table = lut::decode(&data).expect("LUT decode should succeed");

    assert_eq!(table.entries()[0], [255, 127, 0]);
    assert_eq!(table.entries()[127], [1, 0, 127]);
    assert_eq!(lut::encode(&table).unwrap(), data);
}

#[test]
fn decode_and_map_pipeline() {
    let table = lut::decode(&read_fixture("lut/inverted_ramp.lut")).unwrap();
    let decoded = ctx::decode(
        &read_fixture("ctx/single_2x2_hi.ctx"),
        DecodeOptions::default(),
    )
    .unwrap();

    let rgb = map_to_rgb(&decoded.pixels, Some(&table)).unwrap();
    assert_eq!(rgb.dims(), &[2, 2, 3]);
    // Sample 128 -> entry 0, sample 255 -> entry 127
    assert_eq!(&rgb.samples()[..6], &[255, 127, 0, 1, 0, 127]);

    let gray = RgbMapper::builtin().map(&decoded.pixels, None).unwrap();
    assert_eq!(gray, map_to_rgb(&decoded.pixels, Some(&Lut::default_grayscale())).unwrap());
}
