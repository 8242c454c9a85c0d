pub mod decoder;
pub mod encoder;
pub mod format;
pub mod header;
pub mod options;
pub mod registry;

pub use decoder::{decode, open, DjvuRleDecoder};
pub use encoder::{encode, DjvuRleEncoder};
