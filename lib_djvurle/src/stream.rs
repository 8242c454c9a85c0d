use std::io::{self, ErrorKind, Read};

/// Byte-at-a-time reader over any [`Read`] source.
///
/// Keeps track of how many bytes were consumed so the header parser can
/// report where run data starts. Wrap files in a `BufReader` first, every
/// call here goes straight to the underlying source.
pub struct ByteReader<R> {
    inner: R,
    position: usize,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read one byte, `None` at end of stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Fill `buf` completely.
    ///
    /// Returns `Ok(false)` when the stream ends before `buf` is full; the
    /// contents of `buf` are unspecified in that case.
    pub fn fill(&mut self, buf: &mut [u8]) -> io::Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.position += filled;
                    return Ok(false);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.position += filled;
        Ok(true)
    }

    /// Consume one more byte and report whether the stream had ended.
    pub fn is_exhausted(&mut self) -> io::Result<bool> {
        Ok(self.next_byte()?.is_none())
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
