use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Read;

use log::{debug, error};

use super::{checked_len, CompressionError, CompressionResult, DecompressionError};
use crate::constants::{
    COLOR_INDEX_SHIFT, COLOR_MAX_RUN, COLOR_RUN_MASK, MAX_PALETTE_SIZE, TRANSPARENT_INDEX,
};
use crate::stream::ByteReader;

/// Pixel layouts the palette codec can encode from.
#[derive(Clone, Copy, Debug)]
pub enum PaletteSource<'a> {
    Grayscale,
    /// One byte per pixel indexing this RGB palette.
    Indexed(&'a [[u8; 3]]),
    Rgb,
    /// A zero alpha byte marks the pixel transparent, whatever its RGB.
    Rgba,
}

impl PaletteSource<'_> {
    pub fn components(&self) -> usize {
        match self {
            Self::Grayscale | Self::Indexed(_) => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Reads `palette_size` RGB triples.
pub fn read_palette<R: Read>(
    reader: &mut ByteReader<R>,
    palette_size: usize,
) -> Result<Vec<[u8; 3]>, DecompressionError> {
    let mut palette = Vec::with_capacity(palette_size);
    for index in 0..palette_size {
        let mut color = [0u8; 3];
        if !reader.fill(&mut color)? {
            error!("Unexpected end of data while reading palette color #{}", index);
            return Err(DecompressionError::TruncatedPalette {
                index,
                palette_size,
            });
        }
        palette.push(color);
    }
    debug!("Palette loaded: {} colors", palette.len());
    Ok(palette)
}

fn split_word(word: u32) -> (u16, usize) {
    ((word >> COLOR_INDEX_SHIFT) as u16, (word & COLOR_RUN_MASK) as usize)
}

fn pack_word(index: u16, length: usize) -> [u8; 4] {
    ((u32::from(index) << COLOR_INDEX_SHIFT) | length as u32).to_be_bytes()
}

/// Expands 32-bit color runs into RGBA pixels.
///
/// Each big-endian word holds a 12-bit color index above a 20-bit run
/// length. Index `0xFFF` produces transparent black; any other index must
/// be below the palette size.
///
/// # Errors
/// - `TruncatedData` if the stream ends inside a run word
/// - `RunTooLong` if a run passes the end of its row, checked before the index
/// - `ColorIndexOutOfRange` for an index with no palette entry
/// - `ExtraData` if anything follows the last row
pub fn palette_decompression<R: Read>(
    reader: &mut ByteReader<R>,
    palette: &[[u8; 3]],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, DecompressionError> {
    let mut pixels = Vec::new();
    let mut runs = 0usize;

    for row in 1..=height {
        let mut line_length = 0;

        while line_length < width {
            let mut word = [0u8; 4];
            if !reader.fill(&mut word)? {
                error!("Reached EOF while reading line {}", row);
                return Err(DecompressionError::TruncatedData { row });
            }
            let (index, length) = split_word(u32::from_be_bytes(word));

            line_length += length;
            if line_length > width {
                error!("Run of {} pixels overflows line {}", length, row);
                return Err(DecompressionError::RunTooLong { row });
            }

            let rgba = if index == TRANSPARENT_INDEX {
                [0; 4]
            } else {
                match palette.get(usize::from(index)) {
                    Some(&[r, g, b]) => [r, g, b, 0xFF],
                    None => {
                        error!("Color index {} out of range in line {}", index, row);
                        return Err(DecompressionError::ColorIndexOutOfRange {
                            index,
                            palette_size: palette.len(),
                            row,
                        });
                    }
                }
            };
            pixels.reserve(length * 4);
            for _ in 0..length {
                pixels.extend_from_slice(&rgba);
            }
            runs += 1;
        }
    }
    debug!("Decoded {} color runs", runs);

    super::check_exhausted(reader)?;
    Ok(pixels)
}

/// A palette plus the palette index (or [`TRANSPARENT_INDEX`]) of every pixel.
struct IndexedPixels {
    palette: Vec<[u8; 3]>,
    indices: Vec<u16>,
}

/// Palette of the values that actually occur, in ascending order.
fn histogram_palette<F>(pixels: &[u8], color_of: F) -> Result<IndexedPixels, CompressionError>
where
    F: Fn(u8) -> Result<[u8; 3], CompressionError>,
{
    let mut histogram = [0usize; 256];
    for &value in pixels {
        histogram[usize::from(value)] += 1;
    }

    let mut lookup = [0u16; 256];
    let mut palette = Vec::new();
    for (value, _) in (0..=255u8).zip(histogram).filter(|&(_, count)| count > 0) {
        lookup[usize::from(value)] = palette.len() as u16;
        palette.push(color_of(value)?);
    }

    let indices = pixels.iter().map(|&v| lookup[usize::from(v)]).collect();
    Ok(IndexedPixels { palette, indices })
}

/// Palette of the distinct RGB colors in first-seen order.
fn distinct_palette(pixels: &[u8], components: usize) -> Result<IndexedPixels, CompressionError> {
    let mut unique_colors = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(pixels.len() / components);

    for pixel in pixels.chunks_exact(components) {
        if components == 4 && pixel[3] == 0 {
            indices.push(TRANSPARENT_INDEX);
            continue;
        }
        let color = [pixel[0], pixel[1], pixel[2]];
        let index = match unique_colors.entry(color) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    error!("Image has more than {} colors", MAX_PALETTE_SIZE);
                    return Err(CompressionError::TooManyColors(MAX_PALETTE_SIZE));
                }
                palette.push(color);
                *entry.insert((palette.len() - 1) as u16)
            }
        };
        indices.push(index);
    }

    Ok(IndexedPixels { palette, indices })
}

fn push_run(out: &mut Vec<u8>, index: u16, mut length: usize) {
    while length > COLOR_MAX_RUN {
        out.extend_from_slice(&pack_word(index, COLOR_MAX_RUN));
        length -= COLOR_MAX_RUN;
    }
    out.extend_from_slice(&pack_word(index, length));
}

/// Builds a palette for `pixels` and encodes them as 32-bit color runs.
///
/// # Errors
/// - `InvalidPixelDataLength` if `pixels` does not hold `width * height` pixels
/// - `TooManyColors` if a true-color image has more than 4080 colors
/// - `SourceIndexOutOfRange` if an indexed pixel has no source palette entry
pub fn palette_compression(
    pixels: &[u8],
    source: PaletteSource<'_>,
    width: usize,
    height: usize,
) -> Result<CompressionResult, CompressionError> {
    let expected = checked_len(width, height, source.components())?;
    if pixels.len() != expected {
        return Err(CompressionError::InvalidPixelDataLength {
            expected,
            found: pixels.len(),
        });
    }

    let indexed = match source {
        PaletteSource::Grayscale => histogram_palette(pixels, |v| Ok([v, v, v]))?,
        PaletteSource::Indexed(colors) => histogram_palette(pixels, |v| {
            colors
                .get(usize::from(v))
                .copied()
                .ok_or(CompressionError::SourceIndexOutOfRange {
                    value: v,
                    palette_size: colors.len(),
                })
        })?,
        PaletteSource::Rgb => distinct_palette(pixels, 3)?,
        PaletteSource::Rgba => distinct_palette(pixels, 4)?,
    };
    debug!("Palette built: {} colors", indexed.palette.len());

    let mut data = Vec::new();
    for row in indexed.indices.chunks_exact(width) {
        for run in row.chunk_by(|a, b| a == b) {
            push_run(&mut data, run[0], run.len());
        }
    }
    debug!("Color runs: {} bytes", data.len());

    Ok(CompressionResult {
        palette: indexed.palette,
        data,
    })
}
