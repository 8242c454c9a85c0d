use super::decoder::{decode, open, DecodeError};
use super::encoder::{encode, EncodeError};
use super::format::{accept, ColorMode, Header, Image};
use crate::constants::{
    EXTENSIONS, FORMAT_DESCRIPTION, FORMAT_NAME, MIME_ANYMAP, MIME_BITMAP, MIME_PIXMAP,
};

pub type AcceptFn = fn(&[u8]) -> bool;
pub type OpenFn = fn(&[u8]) -> Result<Header, DecodeError>;
pub type DecodeFn = fn(&[u8]) -> Result<Image, DecodeError>;
pub type EncodeFn = fn(usize, usize, ColorMode, &[u8]) -> Result<Vec<u8>, EncodeError>;

/// What a host image library needs to hand a format over to this crate.
#[derive(Clone, Copy)]
pub struct FormatDescriptor {
    pub tag: &'static str,
    pub description: &'static str,
    pub extensions: &'static [&'static str],
    /// Family MIME type; decoded images report a more specific one.
    pub mime_type: &'static str,
    pub custom_mime_types: &'static [&'static str],
    pub accept: AcceptFn,
    pub open: OpenFn,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl FormatDescriptor {
    fn matches_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }

    fn matches_mime(&self, mime: &str) -> bool {
        self.mime_type == mime || self.custom_mime_types.contains(&mime)
    }
}

pub const DJVURLE: FormatDescriptor = FormatDescriptor {
    tag: FORMAT_NAME,
    description: FORMAT_DESCRIPTION,
    extensions: &EXTENSIONS,
    mime_type: MIME_ANYMAP,
    custom_mime_types: &[MIME_BITMAP, MIME_PIXMAP],
    accept,
    open,
    decode,
    encode,
};

/// Formats in registration order, looked up by tag or by content.
#[derive(Default)]
pub struct Registry {
    formats: Vec<FormatDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`DJVURLE`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DJVURLE);
        registry
    }

    /// Add a format, returning the one previously registered under its tag.
    ///
    /// A replacement keeps the position of the format it replaces.
    pub fn register(&mut self, format: FormatDescriptor) -> Option<FormatDescriptor> {
        match self.formats.iter_mut().find(|f| f.tag == format.tag) {
            Some(slot) => Some(std::mem::replace(slot, format)),
            None => {
                self.formats.push(format);
                None
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|f| f.tag == tag)
    }

    /// Earliest registered format whose acceptance predicate takes `prefix`.
    pub fn find_by_prefix(&self, prefix: &[u8]) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|f| (f.accept)(prefix))
    }

    /// Lookup by file extension, with or without the dot, ignoring case.
    /// The earliest registered match wins.
    pub fn find_by_extension(&self, extension: &str) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|f| f.matches_extension(extension))
    }

    pub fn find_by_mime(&self, mime: &str) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|f| f.matches_mime(mime))
    }
}
