/// Limits applied while reading a header.
///
/// Dimensions are unbounded by default; set a limit to refuse huge images
/// from untrusted sources before any pixel is allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    max_width: usize,
    max_height: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width: usize::MAX,
            max_height: usize::MAX,
        }
    }
}

impl DecoderOptions {
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Reject images wider than `width` pixels.
    pub const fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Reject images taller than `height` pixels.
    pub const fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }
}
