use std::io::Read;

use log::{debug, error};

use super::{CompressionError, DecompressionError};
use crate::constants::{
    BITONAL_LONG_FLAG, BITONAL_MASK, BITONAL_MAX_RUN, BITONAL_SHORT_MAX, BLACK, WHITE,
};
use crate::stream::ByteReader;

fn read_run<R: Read>(reader: &mut ByteReader<R>, row: usize) -> Result<usize, DecompressionError> {
    let first = reader
        .next_byte()?
        .ok_or(DecompressionError::TruncatedData { row })?;
    if first <= BITONAL_SHORT_MAX {
        return Ok(usize::from(first));
    }
    let second = reader
        .next_byte()?
        .ok_or(DecompressionError::TruncatedData { row })?;
    Ok(usize::from(u16::from_be_bytes([first, second]) & BITONAL_MASK))
}

/// Expands bitonal runs into one byte per pixel.
///
/// Every row starts with a white run and the color flips after each run,
/// so a row beginning with black carries a leading zero-length run.
///
/// # Returns
/// `width * height` bytes, [`WHITE`] or [`BLACK`].
///
/// # Errors
/// - `TruncatedData` if the stream ends inside a run
/// - `RunTooLong` if a run passes the end of its row
/// - `ExtraData` if anything follows the last row
pub fn bitonal_decompression<R: Read>(
    reader: &mut ByteReader<R>,
    width: usize,
    height: usize,
) -> Result<Vec<u8>, DecompressionError> {
    let mut pixels = Vec::new();
    let mut runs = 0usize;

    for row in 1..=height {
        let mut line_length = 0;
        let mut white = true;

        while line_length < width {
            let run = read_run(reader, row)?;
            line_length += run;
            if line_length > width {
                error!("Run of {} pixels overflows line {}", run, row);
                return Err(DecompressionError::RunTooLong { row });
            }
            let color = if white { WHITE } else { BLACK };
            pixels.resize(pixels.len() + run, color);
            white = !white;
            runs += 1;
        }
    }
    debug!("Decoded {} bitonal runs", runs);

    super::check_exhausted(reader)?;
    Ok(pixels)
}

fn push_long(out: &mut Vec<u8>, length: usize) {
    // length <= BITONAL_MAX_RUN, fits in the low 14 bits
    out.extend_from_slice(&(length as u16 | BITONAL_LONG_FLAG).to_be_bytes());
}

fn push_run(out: &mut Vec<u8>, mut length: usize) {
    while length > BITONAL_MAX_RUN {
        push_long(out, BITONAL_MAX_RUN);
        // zero-length run of the other color keeps the decoder on this one
        out.push(0);
        length -= BITONAL_MAX_RUN;
    }
    match u8::try_from(length) {
        Ok(short) if short <= BITONAL_SHORT_MAX => out.push(short),
        _ => push_long(out, length),
    }
}

/// Encodes one byte per pixel (zero is black, anything else white) as
/// bitonal runs.
pub fn bitonal_compression(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, CompressionError> {
    let expected = super::checked_len(width, height, 1)?;
    if pixels.len() != expected {
        return Err(CompressionError::InvalidPixelDataLength {
            expected,
            found: pixels.len(),
        });
    }

    let mut encoded = Vec::new();
    for row in pixels.chunks_exact(width) {
        let mut white = true;
        for run in row.chunk_by(|a, b| (*a != BLACK) == (*b != BLACK)) {
            if (run[0] != BLACK) != white {
                push_run(&mut encoded, 0);
                white = !white;
            }
            push_run(&mut encoded, run.len());
            white = !white;
        }
    }
    debug!("Bitonal runs: {} bytes", encoded.len());

    Ok(encoded)
}
