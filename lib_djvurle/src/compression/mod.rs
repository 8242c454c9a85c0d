pub mod bitonal;
pub mod palette;

use std::io::{self, Read};

use log::{debug, error, info};
use palette::PaletteSource;
use thiserror::Error;

use crate::image::format::{Header, Mode};
use crate::stream::ByteReader;

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Invalid pixel data length: expected {expected} bytes, got {found}")]
    InvalidPixelDataLength { expected: usize, found: usize },
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Too many colors: more than {0}; reduce to {0} or less")]
    TooManyColors(usize),
    #[error("Pixel value {value} has no entry in the source palette of {palette_size} colors")]
    SourceIndexOutOfRange { value: u8, palette_size: usize },
}

#[derive(Error, Debug)]
pub enum DecompressionError {
    #[error("Unexpected end of data while reading palette color #{index} of {palette_size}")]
    TruncatedPalette { index: usize, palette_size: usize },
    #[error("Reached EOF while reading image data in line {row}")]
    TruncatedData { row: usize },
    #[error("Run too long in line {row}")]
    RunTooLong { row: usize },
    #[error("Color index {index} out of range for {palette_size} colors in line {row}")]
    ColorIndexOutOfRange {
        index: u16,
        palette_size: usize,
        row: usize,
    },
    #[error("There is extra data at the end of the file, offset {offset}")]
    ExtraData { offset: usize },
    #[error("I/O error while reading image data")]
    Io(#[from] io::Error),
}

/// How the pixels handed to [`compress`] are laid out.
#[derive(Clone, Copy, Debug)]
pub enum Layout<'a> {
    Bitonal,
    Paletted(PaletteSource<'a>),
}

pub struct CompressionResult {
    pub palette: Vec<[u8; 3]>,
    pub data: Vec<u8>,
}

pub struct DecompressionResult {
    pub palette: Vec<[u8; 3]>,
    pub pixels: Vec<u8>,
}

/// Byte length of a `width` x `height` buffer, rejecting empty or
/// unaddressable images.
pub(crate) fn checked_len(
    width: usize,
    height: usize,
    components: usize,
) -> Result<usize, CompressionError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(components))
        .filter(|&n| n > 0)
        .ok_or(CompressionError::InvalidDimensions { width, height })
}

/// Fails with `ExtraData` unless the stream ends here.
pub(crate) fn check_exhausted<R: Read>(reader: &mut ByteReader<R>) -> Result<(), DecompressionError> {
    let offset = reader.position();
    if !reader.is_exhausted()? {
        error!("Extra data after the last line at offset {}", offset);
        return Err(DecompressionError::ExtraData { offset });
    }
    Ok(())
}

pub fn compress(
    pixels: &[u8],
    layout: Layout<'_>,
    width: usize,
    height: usize,
) -> Result<CompressionResult, CompressionError> {
    info!("Starting compression of a {}x{} image", width, height);
    debug!("Input data length: {}", pixels.len());

    let result = match layout {
        Layout::Bitonal => CompressionResult {
            palette: Vec::new(),
            data: bitonal::bitonal_compression(pixels, width, height)?,
        },
        Layout::Paletted(source) => palette::palette_compression(pixels, source, width, height)?,
    };

    info!(
        "Compression completed successfully: {} colors, {} bytes of runs",
        result.palette.len(),
        result.data.len()
    );
    Ok(result)
}

/// Decodes the palette (color images only) and runs that follow `header`.
pub fn decompress<R: Read>(
    reader: &mut ByteReader<R>,
    header: &Header,
) -> Result<DecompressionResult, DecompressionError> {
    info!("Starting decompression");

    let result = match header.mode {
        Mode::Bitonal => DecompressionResult {
            palette: Vec::new(),
            pixels: bitonal::bitonal_decompression(reader, header.width, header.height)?,
        },
        Mode::PalettedRgba => {
            let palette = palette::read_palette(reader, header.palette_size)?;
            let pixels =
                palette::palette_decompression(reader, &palette, header.width, header.height)?;
            DecompressionResult { palette, pixels }
        }
    };

    info!("Decompression successful: {} bytes", result.pixels.len());
    Ok(result)
}
