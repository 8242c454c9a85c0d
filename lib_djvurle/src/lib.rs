pub mod compression;
pub mod constants;
pub mod image;
pub mod stream;

use log::*;
use std::io::Write;

pub use crate::image::decoder::DecodeError;
pub use crate::image::encoder::EncodeError;
pub use crate::image::format::{accept, ColorMode, Header, Image, Mode};
pub use crate::image::options::DecoderOptions;
pub use crate::image::{decode, encode, open, DjvuRleDecoder, DjvuRleEncoder};

/// Send this crate's log records to stderr at debug level.
///
/// Fails if another logger was installed first.
pub fn init_logging() -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_djvurle"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
}
