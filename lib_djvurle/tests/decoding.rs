mod common;

use std::io::{BufReader, Cursor, Read};

use common::{bitonal_stream, color_stream, BLACK, WHITE};
use lib_djvurle::compression::DecompressionError;
use lib_djvurle::image::header::HeaderError;
use lib_djvurle::{decode, DecodeError, DecoderOptions, DjvuRleDecoder, Mode};

fn decompression_error(data: &[u8]) -> DecompressionError {
    match decode(data) {
        Err(DecodeError::DecompressionFailed(e)) => e,
        other => panic!("expected a decompression error, got {:?}", other),
    }
}

#[test]
fn test_decode_bitonal() {
    // 4x2: row 1 = 1 white, 2 black, 1 white; row 2 = 0 white, 4 black
    let data = bitonal_stream(4, 2, &[1, 2, 1, 0, 4]);
    let image = decode(&data).unwrap();

    assert_eq!(image.mode, Mode::Bitonal);
    assert_eq!((image.width, image.height), (4, 2));
    assert_eq!(image.mime_type(), "image/x-djvurle-bitmap");
    assert_eq!(
        image.pixels,
        vec![WHITE, BLACK, BLACK, WHITE, BLACK, BLACK, BLACK, BLACK]
    );
}

#[test]
fn test_decode_bitonal_two_byte_run() {
    let data = bitonal_stream(300, 1, &[0xC1, 0x2C]);
    let image = decode(&data).unwrap();
    assert_eq!(image.pixels, vec![WHITE; 300]);
}

#[test]
fn test_decode_color() {
    let palette = [[255, 0, 0], [0, 0, 255]];
    let data = color_stream(3, 1, &palette, &[0x0010_0001, 0xFFF0_0001, 0x0000_0001]);
    let image = decode(&data).unwrap();

    assert_eq!(image.mode, Mode::PalettedRgba);
    assert_eq!(image.palette, palette.to_vec());
    assert_eq!(
        image.pixels,
        vec![0, 0, 255, 255, 0, 0, 0, 0, 255, 0, 0, 255]
    );
    assert_eq!(image.pixel(1, 0), Some(&[0, 0, 0, 0][..]));
}

#[test]
fn test_sentinel_transparency_empty_palette() {
    let data = color_stream(2, 2, &[], &[0xFFF0_0002, 0xFFF0_0002]);
    let image = decode(&data).unwrap();
    assert_eq!(image.pixels, vec![0; 16]);
}

#[test]
fn test_decode_from_buffered_reader() {
    let data = bitonal_stream(2, 2, &[2, 0, 2]);
    let mut decoder = DjvuRleDecoder::new(BufReader::new(Cursor::new(data)));
    let image = decoder.decode().unwrap();
    assert_eq!(image.pixels, vec![WHITE, WHITE, BLACK, BLACK]);

    let mut rest = Vec::new();
    decoder.into_inner().read_to_end(&mut rest).unwrap();
    assert!(rest.is_empty());
}

#[test]
fn test_header_comments_then_data() {
    let image = decode(b"R4 #comment\n#comment\r2#comment\r\n1\n\x01\x01").unwrap();
    assert_eq!(image.pixels, vec![WHITE, BLACK]);
}

#[test]
fn test_decode_wide_stream_default_options() {
    // 20000 white = 16383, 0 black, 3617 white
    let image = decode(b"R4\n20000 1\n\xFF\xFF\x00\xCE\x21").unwrap();
    assert_eq!(image.width, 20000);
    assert_eq!(image.pixels, vec![WHITE; 20000]);
}

#[test]
fn test_dimension_limits() {
    let data = bitonal_stream(20, 1, &[20]);
    let options = DecoderOptions::default().set_max_width(19);
    let result = DjvuRleDecoder::new_with_options(options, &data[..]).decode();
    assert!(matches!(
        result,
        Err(DecodeError::Header(HeaderError::LargeDimensions { limit: 19, found: 20 }))
    ));
}

#[test]
fn test_truncated_palette() {
    assert!(matches!(
        decompression_error(b"R6\n128\n128\n64\n\x00\x00\x00"),
        DecompressionError::TruncatedPalette { index: 1, palette_size: 64 }
    ));
    // two of three bytes of the only color
    assert!(matches!(
        decompression_error(b"R6\n1\n1\n1\n\x00\x00"),
        DecompressionError::TruncatedPalette { index: 0, palette_size: 1 }
    ));
}

#[test]
fn test_truncated_data_bitonal() {
    assert!(matches!(
        decompression_error(b"R4\n128\n128\n\x00"),
        DecompressionError::TruncatedData { row: 1 }
    ));
    // second row never arrives
    assert!(matches!(
        decompression_error(&bitonal_stream(2, 2, &[2])),
        DecompressionError::TruncatedData { row: 2 }
    ));
}

#[test]
fn test_truncated_data_color() {
    assert!(matches!(
        decompression_error(b"R6\n128\n128\n1\n\x00\x00\x00\xFF"),
        DecompressionError::TruncatedData { row: 1 }
    ));
}

#[test]
fn test_run_too_long_bitonal() {
    assert!(matches!(
        decompression_error(b"R4\n128\n128\n\xBF"),
        DecompressionError::RunTooLong { row: 1 }
    ));
}

#[test]
fn test_run_too_long_color() {
    assert!(matches!(
        decompression_error(b"R6\n128\n128\n1\n\x00\x00\x00\x00\x0f\xff\xff"),
        DecompressionError::RunTooLong { row: 1 }
    ));
}

#[test]
fn test_color_index_too_large() {
    let data = color_stream(128, 128, &[[0, 0, 0]], &[0xFF10_0001]);
    assert!(matches!(
        decompression_error(&data),
        DecompressionError::ColorIndexOutOfRange { index: 0xFF1, palette_size: 1, row: 1 }
    ));
}

#[test]
fn test_color_index_boundaries() {
    // index == palette size is out of range
    let data = color_stream(2, 1, &[[0, 0, 0]], &[0x0000_0001, 0x0010_0001]);
    assert!(matches!(
        decompression_error(&data),
        DecompressionError::ColorIndexOutOfRange { index: 1, palette_size: 1, row: 1 }
    ));

    // same index with a run that overflows the row: the length check comes first
    let data = color_stream(2, 1, &[[0, 0, 0]], &[0x0010_0003]);
    assert!(matches!(
        decompression_error(&data),
        DecompressionError::RunTooLong { row: 1 }
    ));

    // last valid index
    let data = color_stream(2, 1, &[[0, 0, 0], [9, 9, 9]], &[0x0010_0002]);
    assert_eq!(decode(&data).unwrap().pixels, vec![9, 9, 9, 255, 9, 9, 9, 255]);
}

#[test]
fn test_extra_data_bitonal() {
    assert!(matches!(
        decompression_error(b"R4\n1\n1\n\x01\x00"),
        DecompressionError::ExtraData { .. }
    ));
}

#[test]
fn test_extra_data_color() {
    assert!(matches!(
        decompression_error(b"R6\n1\n1\n1\n\x00\x00\x00\x00\x00\x00\x01\x00"),
        DecompressionError::ExtraData { offset: 16 }
    ));
}
