//! PNG encoding for finished map canvases.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the canvas has ≤256 unique
//!   colors, which is the normal case for a quake map (background, grid,
//!   shore, depth and a few hundred markers at most).
//! - **RGB PNG (color type 2)**: fallback for canvases with more colors.

use std::collections::HashMap;
use std::io::Write;

use quake_common::{Color, QuakeError, QuakeResult};
use rayon::prelude::*;

use crate::canvas::Canvas;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 64 * 1024;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a canvas, choosing indexed or RGB output automatically.
pub fn encode_png(canvas: &Canvas) -> QuakeResult<Vec<u8>> {
    let pixels = canvas.pixels();
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;

    let palette_result = if pixels.len() >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png_rgb(&canvas.to_rgb_bytes(), width, height),
    }
}

/// Sequential palette extraction for small canvases.
fn extract_palette_sequential(pixels: &[Color]) -> Option<(Vec<Color>, Vec<u8>)> {
    let mut color_to_index: HashMap<Color, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Color> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len());

    for &color in pixels {
        let index = match color_to_index.get(&color) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(color);
                color_to_index.insert(color, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger canvases.
///
/// Collects unique colors per chunk, merges them into one palette, then maps
/// pixels to indices in parallel.
fn extract_palette_parallel(pixels: &[Color]) -> Option<(Vec<Color>, Vec<u8>)> {
    let chunk_size = (pixels.len() / rayon::current_num_threads()).max(256);

    let unique_colors: Vec<Color> = pixels
        .par_chunks(chunk_size)
        .flat_map(|chunk| {
            let mut local: HashMap<Color, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for &color in chunk {
                local.insert(color, ());
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut global: HashMap<Color, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Color> = Vec::with_capacity(MAX_PALETTE_SIZE);
    for color in unique_colors {
        if !global.contains_key(&color) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            global.insert(color, palette.len() as u8);
            palette.push(color);
        }
    }

    let indices: Vec<u8> = pixels
        .par_iter()
        .map(|color| global.get(color).copied().unwrap_or(0))
        .collect();

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[Color],
    indices: &[u8],
) -> QuakeResult<Vec<u8>> {
    check_len(indices.len(), width * height)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for c in palette {
        let (r, g, b) = c.to_rgb();
        plte_data.extend_from_slice(&[r, g, b]);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    let idat_data = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an RGB PNG (color type 2) from packed RGB bytes.
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> QuakeResult<Vec<u8>> {
    check_len(pixels.len(), width * height * 3)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 2));

    let idat_data = deflate_scanlines(pixels, width * 3, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn check_len(actual: usize, expected: usize) -> QuakeResult<()> {
    if actual != expected {
        return Err(QuakeError::EncodeError(format!(
            "pixel buffer has {} bytes, expected {}",
            actual, expected
        )));
    }
    Ok(())
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each `row_bytes`-long scanline with filter type 0 and zlib it.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> QuakeResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(&uncompressed)
        .and_then(|_| encoder.finish())
        .map_err(|e| QuakeError::EncodeError(format!("IDAT compression failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        let pixels = [Color::RED, Color::GREEN, Color::BLUE, Color::RED];
        let (palette, indices) = extract_palette_sequential(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0], indices[3]);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        let pixels: Vec<Color> = (0..300u32)
            .map(|i| Color::new((i % 256) as u8, (i / 256) as u8, 0))
            .collect();
        assert!(extract_palette_sequential(&pixels).is_none());
        assert!(extract_palette_parallel(&pixels).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential_palette() {
        let pixels: Vec<Color> = (0..(128 * 128))
            .map(|i| Color::new((i % 50) as u8, 100, 200))
            .collect();
        let (seq_palette, seq_indices) = extract_palette_sequential(&pixels).unwrap();
        let (par_palette, par_indices) = extract_palette_parallel(&pixels).unwrap();
        assert_eq!(seq_palette.len(), par_palette.len());
        for (i, color) in pixels.iter().enumerate() {
            assert_eq!(seq_palette[seq_indices[i] as usize], *color);
            assert_eq!(par_palette[par_indices[i] as usize], *color);
        }
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        assert!(create_png_rgb(&[0, 0, 0], 2, 1).is_err());
        assert!(create_png_indexed(2, 2, &[Color::WHITE], &[0, 0, 0]).is_err());
    }
}
