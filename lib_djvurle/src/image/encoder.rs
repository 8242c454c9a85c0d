use std::io::{self, Write};

use log::{debug, error, info};
use thiserror::Error;

use super::format::{ColorMode, Mode};
use crate::compression::palette::PaletteSource;
use crate::compression::{compress, CompressionError, Layout};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Cannot write {0:?} images as DjVu RLE")]
    UnsupportedMode(ColorMode),
    #[error("Indexed images need a source palette")]
    MissingPalette,
    #[error("Failed to compress image data: {0}")]
    CompressionFailed(#[from] CompressionError),
    #[error("Failed to write image data")]
    Io(#[from] io::Error),
}

/// Writes an in-memory image as DjVu RLE.
///
/// Bitonal images become `R4` streams; grayscale, indexed, RGB and RGBA
/// images all become `R6` streams with a palette built from the pixels.
pub struct DjvuRleEncoder<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
    color_mode: ColorMode,
    palette: Option<&'a [[u8; 3]]>,
}

impl<'a> DjvuRleEncoder<'a> {
    pub fn new(pixels: &'a [u8], width: usize, height: usize, color_mode: ColorMode) -> Self {
        Self {
            pixels,
            width,
            height,
            color_mode,
            palette: None,
        }
    }

    /// Source palette for [`ColorMode::Indexed`] pixels.
    pub fn with_palette(mut self, palette: &'a [[u8; 3]]) -> Self {
        self.palette = Some(palette);
        self
    }

    fn layout(&self) -> Result<Layout<'a>, EncodeError> {
        let layout = match self.color_mode {
            ColorMode::Bitonal => Layout::Bitonal,
            ColorMode::Grayscale => Layout::Paletted(PaletteSource::Grayscale),
            ColorMode::Indexed => {
                let palette = self.palette.ok_or(EncodeError::MissingPalette)?;
                Layout::Paletted(PaletteSource::Indexed(palette))
            }
            ColorMode::Rgb => Layout::Paletted(PaletteSource::Rgb),
            ColorMode::Rgba => Layout::Paletted(PaletteSource::Rgba),
            ColorMode::GrayscaleAlpha | ColorMode::Cmyk => {
                error!("Unsupported image mode {:?}", self.color_mode);
                return Err(EncodeError::UnsupportedMode(self.color_mode));
            }
        };
        Ok(layout)
    }

    /// Encode into `writer`. On error, whatever was written is garbage.
    pub fn encode_to<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        let layout = self.layout()?;
        let compressed = compress(self.pixels, layout, self.width, self.height)?;

        let mode = match layout {
            Layout::Bitonal => Mode::Bitonal,
            Layout::Paletted(_) => Mode::PalettedRgba,
        };
        writeln!(writer, "{}\n{} {}", mode, self.width, self.height)?;
        if mode == Mode::PalettedRgba {
            writeln!(writer, "{}", compressed.palette.len())?;
            for color in &compressed.palette {
                writer.write_all(color)?;
            }
            debug!("Palette written with {} colors", compressed.palette.len());
        }
        writer.write_all(&compressed.data)?;

        info!("Encoding process completed successfully");
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut encoded = Vec::new();
        self.encode_to(&mut encoded)?;
        Ok(encoded)
    }
}

/// Encode `pixels` laid out as `color_mode`. Indexed images need
/// [`DjvuRleEncoder::with_palette`] instead.
pub fn encode(
    width: usize,
    height: usize,
    color_mode: ColorMode,
    pixels: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    DjvuRleEncoder::new(pixels, width, height, color_mode).encode()
}
