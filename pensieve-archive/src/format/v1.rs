//! Version 1 header and chunk section.

use super::CHUNK_SIZE_FIELD;
use crate::content::ContentBuffer;
use crate::header::PathTable;
use pensieve_core::crc::Crc32;
use pensieve_core::error::{PensieveError, Result};
use pensieve_core::path::valid_path;
use pensieve_core::stream::{FieldReader, FieldWriter};
use std::io::{self, Read, Write};
use tracing::debug;

/// Upper bound on entries pre-allocated from an untrusted file count.
const MAX_PREALLOC_ENTRIES: usize = 4096;

/// One per-file record of the v1 header, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Raw name bytes (UTF-8 once the checksum has been verified).
    pub name: Vec<u8>,
    /// Cumulative offset of this file's chunk from the start of the data.
    pub offset: u64,
    /// Position of the record in the stream.
    pub position: u64,
}

/// The checksummed v1 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV1 {
    /// Sum of all content bytes at save time.
    pub data_length: u64,
    /// Per-file records in table order.
    pub entries: Vec<HeaderEntry>,
    /// CRC-32 stored after the records.
    pub stored_crc: u32,
    /// CRC-32 computed while reading the records.
    pub computed_crc: u32,
}

impl HeaderV1 {
    /// Read the header up to and including the stored CRC.
    ///
    /// Only structural problems fail here; see [`HeaderV1::verify`].
    pub fn read<R: Read>(reader: &mut FieldReader<R>) -> Result<Self> {
        let mut crc = Crc32::new();

        let data_length = reader.read_u64_checked(&mut crc)?;
        let files_count = reader.read_u32_checked(&mut crc)? as usize;

        let mut entries = Vec::with_capacity(files_count.min(MAX_PREALLOC_ENTRIES));
        for _ in 0..files_count {
            let position = reader.position();
            let name_len = reader.read_u16_checked(&mut crc)?;
            let name = reader.read_bytes_checked(name_len as usize, &mut crc)?;
            let offset = reader.read_u64_checked(&mut crc)?;
            entries.push(HeaderEntry {
                name,
                offset,
                position,
            });
        }

        let stored_crc = reader.read_u32()?;

        Ok(Self {
            data_length,
            entries,
            stored_crc,
            computed_crc: crc.finalize(),
        })
    }

    /// Fail with `HeaderCorrupted` unless the checksums agree.
    pub fn verify(&self) -> Result<()> {
        if self.stored_crc != self.computed_crc {
            return Err(PensieveError::header_corrupted(
                self.stored_crc,
                self.computed_crc,
            ));
        }
        Ok(())
    }
}

pub(super) fn write<W: Write>(
    table: &PathTable,
    contents: &[ContentBuffer],
    out: &mut FieldWriter<W>,
) -> Result<()> {
    let mut crc = Crc32::new();

    let data_length: u64 = contents.iter().map(|c| c.len() as u64).sum();
    let live: Vec<_> = table.live_entries().map(|(_, e)| e).collect();
    let files_count = u32::try_from(live.len())
        .map_err(|_| invalid_input(format!("too many files: {}", live.len())))?;

    debug!(files_count, data_length, "writing v1 header");
    out.write_u64_checked(data_length, &mut crc)?;
    out.write_u32_checked(files_count, &mut crc)?;

    let mut acc = 0u64;
    for entry in &live {
        let name_len = u16::try_from(entry.name.len())
            .map_err(|_| invalid_input(format!("name too long: {} bytes", entry.name.len())))?;
        out.write_u16_checked(name_len, &mut crc)?;
        out.write_bytes_checked(entry.name.as_bytes(), &mut crc)?;
        out.write_u64_checked(acc, &mut crc)?;

        acc += contents[entry.content_slot].len() as u64 + CHUNK_SIZE_FIELD;
    }

    let header_crc = crc.finalize();
    out.write_u32(header_crc)?;
    debug!(crc = format_args!("{:#010x}", header_crc), "header written");

    for entry in &live {
        let chunk = contents[entry.content_slot].as_bytes();
        out.write_u64(chunk.len() as u64)?;
        out.write_bytes(chunk)?;
    }

    Ok(())
}

pub(super) fn read<R: Read>(
    reader: &mut FieldReader<R>,
) -> Result<(PathTable, Vec<ContentBuffer>)> {
    let header = HeaderV1::read(reader)?;
    header.verify()?;
    debug!(
        files = header.entries.len(),
        data_length = header.data_length,
        "v1 header verified"
    );

    let mut table = PathTable::new();
    let mut contents = Vec::with_capacity(header.entries.len());
    for entry in header.entries {
        let name = String::from_utf8(entry.name).map_err(|_| {
            PensieveError::corrupted(entry.position, "file name is not valid UTF-8")
        })?;
        if !valid_path(&name) {
            return Err(PensieveError::corrupted(
                entry.position,
                format!("invalid virtual path {:?}", name),
            ));
        }
        contents.push(ContentBuffer::new());
        table.create(&name, contents.len() - 1);
    }

    let mut total = 0u64;
    for content in &mut contents {
        let size = reader.read_u64()?;
        reader.pipe_exact(size, content)?;
        content.rewind();
        total += size;
    }

    if total != header.data_length {
        debug!(
            header = header.data_length,
            actual = total,
            "data length differs from chunk sizes"
        );
    }

    Ok((table, contents))
}

fn invalid_input(message: String) -> PensieveError {
    io::Error::new(io::ErrorKind::InvalidInput, message).into()
}
