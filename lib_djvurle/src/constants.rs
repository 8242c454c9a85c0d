/// Magic number of bitonal (1-bit) images.
pub const MAGIC_BITONAL: [u8; 2] = *b"R4";
/// Magic number of paletted images with transparency.
pub const MAGIC_COLOR: [u8; 2] = *b"R6";

/// Header whitespace: space, tab, CR or LF.
pub const WHITESPACE: [u8; 4] = *b" \t\r\n";
/// Starts a header comment running to the next CR or LF.
pub const COMMENT: u8 = b'#';

/// Largest run length stored in the single-byte bitonal form.
pub const BITONAL_SHORT_MAX: u8 = 0xBF;
/// Marks the first byte of a two-byte bitonal run.
pub const BITONAL_LONG_FLAG: u16 = 0xC000;
/// Clears the two marker bits of a two-byte bitonal run.
pub const BITONAL_MASK: u16 = 0x3FFF;
/// Longest run one bitonal record can carry.
pub const BITONAL_MAX_RUN: usize = BITONAL_MASK as usize;

pub const WHITE: u8 = 0xFF;
pub const BLACK: u8 = 0x00;

/// Lower twenty bits of a color run word hold the run length.
pub const COLOR_RUN_MASK: u32 = 0x000F_FFFF;
/// Upper twelve bits of a color run word hold the color index.
pub const COLOR_INDEX_SHIFT: u32 = 20;
pub const COLOR_MAX_RUN: usize = COLOR_RUN_MASK as usize;
/// Reserved color index for fully transparent runs.
pub const TRANSPARENT_INDEX: u16 = 0xFFF;
/// Largest palette a color image may declare.
pub const MAX_PALETTE_SIZE: usize = 0xFF0;

pub const FORMAT_NAME: &str = "DJVURLE";
pub const FORMAT_DESCRIPTION: &str = "DjVu RLE image";
pub const MIME_BITMAP: &str = "image/x-djvurle-bitmap";
pub const MIME_PIXMAP: &str = "image/x-djvurle-pixmap";
pub const MIME_ANYMAP: &str = "image/x-djvurle-anymap";
pub const EXTENSIONS: [&str; 2] = [".rle", ".djvurle"];
