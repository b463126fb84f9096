//! Tests for PNG encoding of rendered canvases.

use std::io::Read;

use quake_common::{Color, Palette, RenderConfig};
use renderer::png::{create_png_indexed, create_png_rgb, encode_png};
use renderer::{Canvas, Compositor, RecencyGradient};
use test_utils::event_at;

// ============================================================================
// Helper functions
// ============================================================================

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Walk the chunk list and return (type, data) pairs.
fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    let mut out = Vec::new();
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
        let mut kind = [0u8; 4];
        kind.copy_from_slice(&png[pos + 4..pos + 8]);
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes([
            png[pos + 8 + len],
            png[pos + 9 + len],
            png[pos + 10 + len],
            png[pos + 11 + len],
        ]);
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&kind);
        hasher.update(&data);
        assert_eq!(hasher.finalize(), crc, "bad CRC on {:?}", kind);
        out.push((kind, data));
        pos += 12 + len;
    }
    out
}

fn find_chunk<'a>(chunks: &'a [([u8; 4], Vec<u8>)], kind: &[u8; 4]) -> Option<&'a Vec<u8>> {
    chunks.iter().find(|(k, _)| k == kind).map(|(_, d)| d)
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).unwrap();
    out
}

// ============================================================================
// encoding tests
// ============================================================================

#[test]
fn test_rendered_map_encodes_as_indexed() {
    let config = RenderConfig::new(360, 180, true).unwrap();
    let coloring = RecencyGradient;
    let compositor = Compositor::new(&config, Palette::default(), &coloring);
    let events = vec![
        event_at(0.0, 0.0, 5.0, 30.0, 0.0),
        event_at(100.0, -30.0, 3.0, 10.0, 4.0),
    ];
    let (canvas, _) = compositor.render(&events, &[]);

    let png = encode_png(&canvas).unwrap();
    assert_eq!(&png[0..8], &SIGNATURE);

    let chunks = chunks(&png);
    let ihdr = find_chunk(&chunks, b"IHDR").unwrap();
    assert_eq!(u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]), 360);
    assert_eq!(u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]), 180);
    assert_eq!(ihdr[9], 3, "expected indexed color type");
    assert!(find_chunk(&chunks, b"PLTE").is_some());
    assert_eq!(chunks.last().map(|(k, _)| *k), Some(*b"IEND"));

    let raw = inflate(find_chunk(&chunks, b"IDAT").unwrap());
    assert_eq!(raw.len(), 180 * (1 + 360));
}

#[test]
fn test_indexed_pixels_round_trip_through_palette() {
    let mut canvas = Canvas::new(3, 2, Color::WHITE);
    canvas.set(1, 0, Color::RED);
    canvas.set(2, 1, Color::CYAN);

    let png = encode_png(&canvas).unwrap();
    let chunks = chunks(&png);
    let plte = find_chunk(&chunks, b"PLTE").unwrap();
    let raw = inflate(find_chunk(&chunks, b"IDAT").unwrap());

    let lookup = |i: u8| {
        let i = i as usize * 3;
        Color::new(plte[i], plte[i + 1], plte[i + 2])
    };
    for y in 0..2 {
        let row = &raw[y * 4..(y + 1) * 4];
        assert_eq!(row[0], 0, "filter byte");
        for x in 0..3 {
            assert_eq!(Some(lookup(row[1 + x])), canvas.get(x as i64, y as i64));
        }
    }
}

#[test]
fn test_many_colors_fall_back_to_rgb() {
    let mut canvas = Canvas::new(300, 1, Color::WHITE);
    for x in 0..300 {
        canvas.set(x, 0, Color::new((x % 256) as u8, (x / 256) as u8, 7));
    }

    let png = encode_png(&canvas).unwrap();
    let chunks = chunks(&png);
    let ihdr = find_chunk(&chunks, b"IHDR").unwrap();
    assert_eq!(ihdr[9], 2, "expected RGB color type");
    assert!(find_chunk(&chunks, b"PLTE").is_none());

    let raw = inflate(find_chunk(&chunks, b"IDAT").unwrap());
    assert_eq!(raw.len(), 1 + 300 * 3);
    assert_eq!(&raw[1..4], &[0, 0, 7]);
}

#[test]
fn test_indexed_smaller_than_rgb_for_map() {
    let config = RenderConfig::new(720, 360, false).unwrap();
    let coloring = RecencyGradient;
    let compositor = Compositor::new(&config, Palette::default(), &coloring);
    let (canvas, _) = compositor.render(&[], &[]);

    let indexed = encode_png(&canvas).unwrap();
    let rgb = create_png_rgb(&canvas.to_rgb_bytes(), 720, 360).unwrap();
    assert!(indexed.len() < rgb.len());
}

#[test]
fn test_explicit_indexed_encoder() {
    let palette = [Color::BLACK, Color::WHITE];
    let png = create_png_indexed(2, 2, &palette, &[0, 1, 1, 0]).unwrap();
    let chunks = chunks(&png);
    assert_eq!(find_chunk(&chunks, b"PLTE").unwrap(), &vec![0, 0, 0, 255, 255, 255]);
}
