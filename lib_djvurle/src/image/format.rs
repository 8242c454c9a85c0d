use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::constants::{MAGIC_BITONAL, MAGIC_COLOR, MIME_BITMAP, MIME_PIXMAP};

/// The two sub-formats, selected by the magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// `R4`: black and white runs, one byte per decoded pixel.
    Bitonal,
    /// `R6`: palette indices with a transparent sentinel, RGBA pixels.
    PalettedRgba,
}

impl Mode {
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            m if m == MAGIC_BITONAL => Some(Self::Bitonal),
            m if m == MAGIC_COLOR => Some(Self::PalettedRgba),
            _ => None,
        }
    }

    pub const fn magic(self) -> [u8; 2] {
        match self {
            Self::Bitonal => MAGIC_BITONAL,
            Self::PalettedRgba => MAGIC_COLOR,
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Bitonal => MIME_BITMAP,
            Self::PalettedRgba => MIME_PIXMAP,
        }
    }

    /// Bytes per pixel in a decoded buffer.
    pub const fn components(self) -> usize {
        match self {
            Self::Bitonal => 1,
            Self::PalettedRgba => 4,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitonal => write!(f, "R4"),
            Self::PalettedRgba => write!(f, "R6"),
        }
    }
}

/// Pixel layout of an in-memory image handed to the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    /// One byte per pixel, zero is black and anything else white.
    Bitonal,
    Grayscale,
    GrayscaleAlpha,
    /// One byte per pixel indexing a separate RGB palette.
    Indexed,
    Rgb,
    Rgba,
    Cmyk,
}

impl ColorMode {
    pub const fn components(self) -> usize {
        match self {
            Self::Bitonal | Self::Grayscale | Self::Indexed => 1,
            Self::GrayscaleAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba | Self::Cmyk => 4,
        }
    }

    /// Sub-format an image in this layout is written as, `None` if it
    /// cannot be written at all.
    pub const fn target_mode(self) -> Option<Mode> {
        match self {
            Self::Bitonal => Some(Mode::Bitonal),
            Self::Grayscale | Self::Indexed | Self::Rgb | Self::Rgba => Some(Mode::PalettedRgba),
            Self::GrayscaleAlpha | Self::Cmyk => None,
        }
    }
}

/// Everything the header declares, plus where the run data begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    /// Always zero for bitonal images.
    pub palette_size: usize,
    /// Offset of the first palette or run byte from the start of the stream.
    pub data_offset: usize,
}

#[derive(Debug)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub mode: Mode,
    pub palette: Vec<[u8; 3]>,
    /// Row-major pixels, `mode.components()` bytes each.
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn new(
        width: usize,
        height: usize,
        mode: Mode,
        palette: Vec<[u8; 3]>,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            mode,
            palette,
            pixels,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.mode.mime_type()
    }

    /// Bytes of the pixel at (`x`, `y`), `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let components = self.mode.components();
        let start = (y * self.width + x) * components;
        self.pixels.get(start..start + components)
    }
}

/// Cheap check of the first bytes of a stream: `R` followed by `4` or `6`.
pub fn accept(prefix: &[u8]) -> bool {
    matches!(prefix, [b'R', b'4' | b'6', ..])
}
