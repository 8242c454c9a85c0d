mod common;

use common::{bitonal_stream, color_stream};
use lib_djvurle::image::header::HeaderError;
use lib_djvurle::{open, DecodeError, Mode};

fn header_error(data: &[u8]) -> HeaderError {
    match open(data) {
        Err(DecodeError::Header(e)) => e,
        other => panic!("expected a header error, got {:?}", other),
    }
}

#[test]
fn test_header_with_comments() {
    let header = open(b"R4 #comment\n#comment\r12#comment\r8\n128#comment\n").unwrap();
    assert_eq!(header.mode, Mode::Bitonal);
    assert_eq!((header.width, header.height), (128, 128));
}

#[test]
fn test_header_token_order() {
    let header = open(b"R6 #magic\n#c\n5\t#c\n7\r\n#c\n12\n").unwrap();
    assert_eq!(header.mode, Mode::PalettedRgba);
    assert_eq!(header.width, 5);
    assert_eq!(header.height, 7);
    assert_eq!(header.palette_size, 12);
    assert_eq!(header.mode.mime_type(), "image/x-djvurle-pixmap");
}

#[test]
fn test_header_data_offset() {
    let data = color_stream(3, 2, &[[1, 2, 3]], &[]);
    let header = open(&data).unwrap();
    assert_eq!(header.data_offset, b"R6\n3\n2\n1\n".len());

    let data = bitonal_stream(3, 2, &[3]);
    assert_eq!(open(&data).unwrap().data_offset, data.len() - 1);
}

#[test]
fn test_nondecimal_header() {
    assert!(matches!(
        header_error(b"R4\n128\x00"),
        HeaderError::MalformedToken { byte: 0, .. }
    ));
    assert!(matches!(
        header_error(b"R4 12 -8\n"),
        HeaderError::MalformedToken { byte: b'-', .. }
    ));
}

#[test]
fn test_truncated_header() {
    assert!(header_error(b"R4\n128").is_truncated());
    assert!(header_error(b"R6 128 128").is_truncated());
    assert!(header_error(b"R6 128 128 #palette size never comes").is_truncated());
}

#[test]
fn test_too_many_colors_decoder() {
    assert!(matches!(
        header_error(b"R6\n128\n128\n4081"),
        HeaderError::TooManyColors(4081)
    ));
    assert_eq!(open(b"R6\n128\n128\n4080\n").unwrap().palette_size, 4080);
}

#[test]
fn test_bad_magic() {
    for data in [&b"R45"[..], b"R5 1 1\n", b"P4 1 1\n", b"R", b"", b"R 4 1 1\n", b"R4x 1 1\n"] {
        let error = header_error(data);
        assert!(error.is_unrecognized(), "{:?} gave {:?}", data, error);
    }
}

#[test]
fn test_zero_dimensions() {
    assert!(matches!(
        header_error(b"R4 0 8\n"),
        HeaderError::InvalidDimensions { width: 0, height: 8 }
    ));
    assert!(matches!(
        header_error(b"R6 8 0 1\n"),
        HeaderError::InvalidDimensions { width: 8, height: 0 }
    ));
}
