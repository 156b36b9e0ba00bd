//! Pensieve binary format.
//!
//! ## Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! +0   4  magic (0x33D9AFEE)
//! +4   2  major version
//! +6   2  minor version
//! +8   8  data length (sum of content bytes)        ┐
//! +16  4  live file count                           │ folded into
//!      per file:                                    │ the header CRC
//!        2  name length                             │
//!        N  name bytes                              │
//!        8  cumulative chunk offset                 ┘
//!      4  CRC-32 of the fields above
//!      per file, same order:
//!        8  content length
//!        N  content bytes
//! ```
//!
//! The stream is written and read strictly front to back. The per-file
//! offsets are checksummed metadata only; the loader never seeks.
//!
//! ## Versions
//!
//! The major version selects a loader from the closed [`FormatVersion`]
//! set. Minor versions are informational.

mod v1;

pub use v1::{HeaderEntry, HeaderV1};

use crate::content::ContentBuffer;
use crate::header::PathTable;
use pensieve_core::error::{PensieveError, Result};
use pensieve_core::stream::{FieldReader, FieldWriter};
use std::fmt;
use std::io::{Read, Write};

/// Container magic number.
pub const MAGIC: u32 = 0x33D9AFEE;

/// Major version written by this build, and the highest one it reads.
pub const MAJOR: u16 = 1;

/// Minor version written by this build.
pub const MINOR: u16 = 0;

/// Size of the length field that prefixes every content chunk.
pub const CHUNK_SIZE_FIELD: u64 = 8;

/// Size of the fixed preamble (magic and version).
pub const PREAMBLE_SIZE: u64 = 8;

/// Supported format major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Version 1: CRC-protected header followed by length-prefixed chunks.
    V1,
}

impl FormatVersion {
    /// The version this build writes.
    pub const CURRENT: Self = Self::V1;

    /// Resolve a major version read from a stream.
    pub fn from_major(major: u16) -> Result<Self> {
        if major > MAJOR {
            return Err(PensieveError::incompatible_major(major, MAJOR));
        }
        match major {
            1 => Ok(Self::V1),
            _ => Err(PensieveError::incompatible_major(major, MAJOR)),
        }
    }

    /// Numeric major version.
    pub fn major(self) -> u16 {
        match self {
            Self::V1 => 1,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.major())
    }
}

/// Magic number and version, the part of the stream shared by all versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    /// Major version.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
}

impl Preamble {
    /// Preamble written by this build.
    pub fn current() -> Self {
        Self {
            major: MAJOR,
            minor: MINOR,
        }
    }

    /// Read and check the magic number, then read the version.
    pub fn read<R: Read>(reader: &mut FieldReader<R>) -> Result<Self> {
        let magic = reader.read_u32()?;
        if magic != MAGIC {
            return Err(PensieveError::not_a_container(magic));
        }
        let major = reader.read_u16()?;
        let minor = reader.read_u16()?;
        Ok(Self { major, minor })
    }

    /// Write magic and version.
    pub fn write<W: Write>(&self, writer: &mut FieldWriter<W>) -> Result<()> {
        writer.write_u32(MAGIC)?;
        writer.write_u16(self.major)?;
        writer.write_u16(self.minor)?;
        Ok(())
    }

    /// Loader to dispatch to.
    pub fn version(&self) -> Result<FormatVersion> {
        FormatVersion::from_major(self.major)
    }
}

/// Serialize a path table and its content buffers.
///
/// Returns the number of bytes written.
pub fn write_container<W: Write>(
    table: &PathTable,
    contents: &[ContentBuffer],
    writer: W,
) -> Result<u64> {
    let mut out = FieldWriter::new(writer);
    Preamble::current().write(&mut out)?;
    match FormatVersion::CURRENT {
        FormatVersion::V1 => v1::write(table, contents, &mut out)?,
    }
    out.flush()?;
    Ok(out.position())
}

/// Parse a container stream into a fresh path table and content buffers.
///
/// Nothing is returned unless the whole stream parsed cleanly.
pub fn read_container<R: Read>(reader: R) -> Result<(PathTable, Vec<ContentBuffer>)> {
    let mut input = FieldReader::new(reader);
    let preamble = Preamble::read(&mut input)?;
    match preamble.version()? {
        FormatVersion::V1 => v1::read(&mut input),
    }
}
