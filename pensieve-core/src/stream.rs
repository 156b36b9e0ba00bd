//! Little-endian field I/O for the container format.
//!
//! `FieldReader` and `FieldWriter` wrap any `Read`/`Write` and move
//! fixed-width integers and raw byte ranges. Each operation has a `*_checked`
//! variant that also folds the raw bytes into a running [`Crc32`], which is
//! how the container header checksum is accumulated without re-serializing
//! anything.
//!
//! A read that comes up short is reported as
//! [`PensieveError::FileCorrupted`] with the offset of the field that could
//! not be completed.
//!
//! # Example
//!
//! ```
//! use pensieve_core::crc::Crc32;
//! use pensieve_core::stream::{FieldReader, FieldWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut crc = Crc32::new();
//! {
//!     let mut writer = FieldWriter::new(&mut output);
//!     writer.write_u16_checked(7, &mut crc).unwrap();
//!     writer.write_bytes_checked(b"/a/file", &mut crc).unwrap();
//! }
//!
//! let mut check = Crc32::new();
//! let mut reader = FieldReader::new(Cursor::new(&output));
//! let len = reader.read_u16_checked(&mut check).unwrap();
//! assert_eq!(reader.read_bytes_checked(len as usize, &mut check).unwrap(), b"/a/file");
//! assert_eq!(crc.value(), check.value());
//! ```

use crate::crc::Crc32;
use crate::error::{PensieveError, Result};
use std::io::{self, Read, Write};

/// Reads little-endian fields from an underlying reader.
#[derive(Debug)]
pub struct FieldReader<R: Read> {
    reader: R,
    position: u64,
}

impl<R: Read> FieldReader<R> {
    /// Create a new `FieldReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume this `FieldReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill `buf` completely or fail with `FileCorrupted`.
    fn fill(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        match self.reader.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(PensieveError::corrupted(
                self.position,
                format!("short read of {} ({} bytes expected)", what, buf.len()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf, what)?;
        Ok(buf)
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array::<2>("u16").map(u16::from_le_bytes)
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array::<4>("u32").map(u32::from_le_bytes)
    }

    /// Read a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array::<8>("u64").map(u64::from_le_bytes)
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf, "byte range")?;
        Ok(buf)
    }

    /// Read a `u16` and fold it into `crc`.
    pub fn read_u16_checked(&mut self, crc: &mut Crc32) -> Result<u16> {
        let buf = self.read_array::<2>("u16")?;
        crc.update(&buf);
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a `u32` and fold it into `crc`.
    pub fn read_u32_checked(&mut self, crc: &mut Crc32) -> Result<u32> {
        let buf = self.read_array::<4>("u32")?;
        crc.update(&buf);
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a `u64` and fold it into `crc`.
    pub fn read_u64_checked(&mut self, crc: &mut Crc32) -> Result<u64> {
        let buf = self.read_array::<8>("u64")?;
        crc.update(&buf);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read exactly `len` bytes and fold them into `crc`.
    pub fn read_bytes_checked(&mut self, len: usize, crc: &mut Crc32) -> Result<Vec<u8>> {
        let buf = self.read_bytes(len)?;
        crc.update(&buf);
        Ok(buf)
    }

    /// Copy up to `len` bytes into `sink`, returning how many were moved.
    ///
    /// Nothing is buffered up front, so a bogus length on a truncated stream
    /// simply yields a short count.
    pub fn pipe_into<W: Write + ?Sized>(&mut self, len: u64, sink: &mut W) -> Result<u64> {
        let copied = io::copy(&mut (&mut self.reader).take(len), sink)?;
        self.position += copied;
        Ok(copied)
    }

    /// Copy exactly `len` bytes into `sink` or fail with `FileCorrupted`.
    pub fn pipe_exact<W: Write + ?Sized>(&mut self, len: u64, sink: &mut W) -> Result<()> {
        let start = self.position;
        let copied = self.pipe_into(len, sink)?;
        if copied != len {
            return Err(PensieveError::corrupted(
                start,
                format!("short read of chunk: {} of {} bytes", copied, len),
            ));
        }
        Ok(())
    }
}

/// Writes little-endian fields to an underlying writer.
#[derive(Debug)]
pub struct FieldWriter<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> FieldWriter<W> {
    /// Create a new `FieldWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
        }
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume this `FieldWriter` and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a little-endian `u64`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write raw bytes and fold them into `crc`.
    pub fn write_bytes_checked(&mut self, bytes: &[u8], crc: &mut Crc32) -> Result<()> {
        crc.update(bytes);
        self.write_bytes(bytes)
    }

    /// Write a `u16` and fold it into `crc`.
    pub fn write_u16_checked(&mut self, value: u16, crc: &mut Crc32) -> Result<()> {
        self.write_bytes_checked(&value.to_le_bytes(), crc)
    }

    /// Write a `u32` and fold it into `crc`.
    pub fn write_u32_checked(&mut self, value: u32, crc: &mut Crc32) -> Result<()> {
        self.write_bytes_checked(&value.to_le_bytes(), crc)
    }

    /// Write a `u64` and fold it into `crc`.
    pub fn write_u64_checked(&mut self, value: u64, crc: &mut Crc32) -> Result<()> {
        self.write_bytes_checked(&value.to_le_bytes(), crc)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
