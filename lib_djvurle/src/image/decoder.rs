use std::io::Read;

use log::{debug, info};
use thiserror::Error;

use super::format::{Header, Image, Mode};
use super::header::{read_header, HeaderError};
use super::options::DecoderOptions;
use crate::compression::{decompress, DecompressionError};
use crate::stream::ByteReader;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid header: {0}")]
    Header(#[from] HeaderError),
    #[error("Decompression failed: {0}")]
    DecompressionFailed(#[from] DecompressionError),
    #[error("Image data was already decoded")]
    AlreadyDecoded,
}

impl DecodeError {
    /// True when the data is not DjVu RLE at all, rather than broken DjVu RLE.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Header(e) if e.is_unrecognized())
    }
}

/// A DjVu RLE decoder over any byte source.
///
/// The decoder reads strictly forward and never looks past the last run,
/// apart from the single byte needed to prove the stream ended.
pub struct DjvuRleDecoder<R: Read> {
    reader: ByteReader<R>,
    options: DecoderOptions,
    header: Option<Header>,
    decoded: bool,
}

impl<R: Read> DjvuRleDecoder<R> {
    /// Create a new decoder with default options
    ///
    /// # Example
    /// ```
    /// use lib_djvurle::DjvuRleDecoder;
    /// let mut decoder = DjvuRleDecoder::new(&b"NOT VALID RLE"[..]);
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(source: R) -> Self {
        Self::new_with_options(DecoderOptions::default(), source)
    }

    pub fn new_with_options(options: DecoderOptions, source: R) -> Self {
        Self {
            reader: ByteReader::new(source),
            options,
            header: None,
            decoded: false,
        }
    }

    /// Parse the header and keep it, leaving the source at the first
    /// palette or run byte. Calling it again returns the stored header.
    pub fn read_headers(&mut self) -> Result<Header, DecodeError> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let header = read_header(&mut self.reader, &self.options)?;
        self.header = Some(header);
        Ok(header)
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Return image dimensions or none if headers aren't decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|h| (h.width, h.height))
    }

    pub fn mode(&self) -> Option<Mode> {
        self.header.map(|h| h.mode)
    }

    pub fn palette_size(&self) -> Option<usize> {
        self.header.map(|h| h.palette_size)
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        self.header.map(|h| h.mode.mime_type())
    }

    /// Decode the whole image, reading the header first if needed.
    ///
    /// Bitonal images come back with one byte per pixel (`0xFF` white,
    /// `0x00` black), color images with four (RGBA).
    pub fn decode(&mut self) -> Result<Image, DecodeError> {
        if self.decoded {
            return Err(DecodeError::AlreadyDecoded);
        }
        let header = self.read_headers()?;
        self.decoded = true;
        debug!("Run data starts at offset {}", header.data_offset);

        let result = decompress(&mut self.reader, &header)?;
        info!(
            "Decoded {}x{} {} image",
            header.width, header.height, header.mode
        );

        Ok(Image::new(
            header.width,
            header.height,
            header.mode,
            result.palette,
            result.pixels,
        ))
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

/// Decode a complete in-memory DjVu RLE stream.
pub fn decode(encoded_data: &[u8]) -> Result<Image, DecodeError> {
    DjvuRleDecoder::new(encoded_data).decode()
}

/// Parse only the header of an in-memory stream.
pub fn open(encoded_data: &[u8]) -> Result<Header, DecodeError> {
    DjvuRleDecoder::new(encoded_data).read_headers()
}
