use std::io::{self, Read};

use log::{debug, error, info};
use thiserror::Error;

use super::format::{Header, Mode};
use super::options::DecoderOptions;
use crate::constants::{COMMENT, MAX_PALETTE_SIZE, WHITESPACE};
use crate::stream::ByteReader;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Not a DjVu RLE file")]
    UnrecognizedFormat,
    #[error("Non-decimal-ASCII byte {byte:#04x} found in header at offset {offset}")]
    MalformedToken { byte: u8, offset: usize },
    #[error("Reached EOF while reading header")]
    Truncated,
    #[error("Header value {0} is too large")]
    NumberOverflow(String),
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Too large dimensions, expected a value less than {limit} but found {found}")]
    LargeDimensions { limit: usize, found: usize },
    #[error("Too many colors: {0}; reduce to 4080 or less")]
    TooManyColors(usize),
    #[error("I/O error while reading header")]
    Io(#[from] io::Error),
}

impl HeaderError {
    /// The stream is not this format at all, as opposed to a broken header.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedFormat)
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Whitespace,
    /// Skipping to the next CR or LF, then back to whitespace or the token.
    Comment { in_token: bool },
    Token,
}

enum Step {
    Continue(ScanState),
    Done,
}

fn is_whitespace(byte: u8) -> bool {
    WHITESPACE.contains(&byte)
}

/// Advance the tokenizer by one byte (`None` is end of stream).
fn step(
    state: ScanState,
    byte: Option<u8>,
    offset: usize,
    token: &mut Vec<u8>,
) -> Result<Step, HeaderError> {
    let next = match (state, byte) {
        (ScanState::Whitespace, None) => return Err(HeaderError::Truncated),
        (ScanState::Whitespace, Some(COMMENT)) => ScanState::Comment { in_token: false },
        (ScanState::Whitespace, Some(b)) if is_whitespace(b) => ScanState::Whitespace,

        // a comment swallows its line ending; digits on the next line continue the token
        (ScanState::Comment { in_token: true }, None) => return Ok(Step::Done),
        (ScanState::Comment { in_token: false }, None) => return Err(HeaderError::Truncated),
        (ScanState::Comment { in_token }, Some(b'\r' | b'\n')) => {
            if in_token {
                ScanState::Token
            } else {
                ScanState::Whitespace
            }
        }
        (ScanState::Comment { in_token }, Some(_)) => ScanState::Comment { in_token },

        (ScanState::Token, None) => return Ok(Step::Done),
        (ScanState::Token, Some(COMMENT)) => ScanState::Comment { in_token: true },
        (ScanState::Token, Some(b)) if is_whitespace(b) => return Ok(Step::Done),

        (ScanState::Whitespace | ScanState::Token, Some(b)) => {
            if !b.is_ascii_digit() {
                return Err(HeaderError::MalformedToken { byte: b, offset });
            }
            token.push(b);
            ScanState::Token
        }
    };
    Ok(Step::Continue(next))
}

fn scan<R: Read>(
    reader: &mut ByteReader<R>,
    mut state: ScanState,
    token: &mut Vec<u8>,
) -> Result<(), HeaderError> {
    loop {
        let offset = reader.position();
        let byte = reader.next_byte()?;
        match step(state, byte, offset, token)? {
            Step::Continue(next) => state = next,
            Step::Done => return Ok(()),
        }
    }
}

/// Read one ASCII decimal token, skipping whitespace and `#` comments.
///
/// The token ends at the first whitespace byte after its digits, which is
/// consumed, or at end of stream.
pub fn read_token<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<u8>, HeaderError> {
    let mut token = Vec::new();
    scan(reader, ScanState::Whitespace, &mut token)?;
    Ok(token)
}

fn read_number<R: Read>(reader: &mut ByteReader<R>) -> Result<usize, HeaderError> {
    let token = read_token(reader)?;
    token
        .iter()
        .try_fold(0usize, |value, &digit| {
            value
                .checked_mul(10)?
                .checked_add(usize::from(digit - b'0'))
        })
        .ok_or_else(|| HeaderError::NumberOverflow(String::from_utf8_lossy(&token).into_owned()))
}

fn skip_comment<R: Read>(reader: &mut ByteReader<R>) -> Result<(), HeaderError> {
    while let Some(byte) = reader.next_byte()? {
        if byte == b'\r' || byte == b'\n' {
            break;
        }
    }
    Ok(())
}

/// The magic number is exactly two bytes, ended by whitespace, a comment
/// or the end of the stream.
fn read_magic<R: Read>(reader: &mut ByteReader<R>) -> Result<Mode, HeaderError> {
    let mut magic = [0u8; 2];
    if !reader.fill(&mut magic)? {
        return Err(HeaderError::UnrecognizedFormat);
    }
    let mode = Mode::from_magic(&magic).ok_or(HeaderError::UnrecognizedFormat)?;
    match reader.next_byte()? {
        None => {}
        Some(COMMENT) => skip_comment(reader)?,
        Some(b) if is_whitespace(b) => {}
        Some(_) => return Err(HeaderError::UnrecognizedFormat),
    }
    Ok(mode)
}

fn check_limit(found: usize, limit: usize) -> Result<(), HeaderError> {
    if found > limit {
        error!("Dimension {} exceeds limit {}", found, limit);
        return Err(HeaderError::LargeDimensions { limit, found });
    }
    Ok(())
}

/// Parse the header: magic number, width, height and, for color images,
/// the palette size.
///
/// Reading stops right after the last token, leaving `reader` at the first
/// palette or run byte.
pub fn read_header<R: Read>(
    reader: &mut ByteReader<R>,
    options: &DecoderOptions,
) -> Result<Header, HeaderError> {
    let mode = read_magic(reader)?;
    debug!("Magic number {} accepted", mode);

    let width = read_number(reader)?;
    let height = read_number(reader)?;
    if width == 0 || height == 0 {
        error!("Image has no pixels: {}x{}", width, height);
        return Err(HeaderError::InvalidDimensions { width, height });
    }
    check_limit(width, options.get_max_width())?;
    check_limit(height, options.get_max_height())?;
    debug!("Image dimensions read: width={} height={}", width, height);

    let palette_size = match mode {
        Mode::Bitonal => 0,
        Mode::PalettedRgba => {
            let size = read_number(reader)?;
            if size > MAX_PALETTE_SIZE {
                error!("Palette size {} exceeds {}", size, MAX_PALETTE_SIZE);
                return Err(HeaderError::TooManyColors(size));
            }
            debug!("Palette size: {}", size);
            size
        }
    };

    let header = Header {
        mode,
        width,
        height,
        palette_size,
        data_offset: reader.position(),
    };
    info!("Header parsed: {:?}", header);
    Ok(header)
}
