//! Binary content buffers.
//!
//! Every virtual file owns one [`ContentBuffer`]: a growable byte vector with
//! a read/write cursor. It implements [`Read`], [`Write`] and [`Seek`], so
//! callers fill and drain it with the usual `std::io` machinery.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Growable in-memory byte buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuffer {
    inner: Cursor<Vec<u8>>,
}

impl ContentBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes stored, regardless of the cursor.
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// All stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Move the cursor back to the first byte.
    pub fn rewind(&mut self) {
        self.inner.set_position(0);
    }

    /// Drop all bytes but keep the allocation.
    pub fn clear(&mut self) {
        self.inner.get_mut().clear();
        self.inner.set_position(0);
    }

    /// Drop all bytes and release the allocation.
    pub fn reset(&mut self) {
        self.inner = Cursor::new(Vec::new());
    }

    /// Consume the buffer and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl From<Vec<u8>> for ContentBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }
}

impl Read for ContentBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for ContentBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for ContentBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
