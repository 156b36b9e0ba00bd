//! Verbose check: walk a container field by field.
//!
//! Unlike [`check_file`](super::check_file) this does not build a container.
//! Every field is printed as soon as it is read, so a damaged file shows
//! exactly how far it parses before the first anomaly.

use pensieve_archive::format::{CHUNK_SIZE_FIELD, FormatVersion, MAGIC};
use pensieve_core::crc::Crc32;
use pensieve_core::error::{ErrorCode, PensieveError, Result};
use pensieve_core::stream::FieldReader;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

/// Bytes of each chunk shown in the dump.
const PREVIEW_LEN: u64 = 32;

/// Dump the container at `path`.
pub fn dump_file<W: Write>(path: &Path, out: &mut W) -> io::Result<ErrorCode> {
    match File::open(path) {
        Ok(file) => dump_stream(BufReader::new(file), out),
        Err(e) => {
            tracing::debug!("cannot open {}: {}", path.display(), e);
            writeln!(out, "[Error]: {}", ErrorCode::FileDoesNotExist.describe())?;
            writeln!(out, "{}", ErrorCode::FileDoesNotExist)?;
            Ok(ErrorCode::FileDoesNotExist)
        }
    }
}

/// Dump a container stream. Returns the result kind of the walk.
pub fn dump_stream<R: Read, W: Write>(reader: R, out: &mut W) -> io::Result<ErrorCode> {
    let mut input = FieldReader::new(reader);
    match walk(&mut input, out) {
        Ok(()) => {
            writeln!(out, "[END OF FILE]")?;
            writeln!(out, "{}", ErrorCode::Ok)?;
            Ok(ErrorCode::Ok)
        }
        Err(PensieveError::Io(e)) => Err(e),
        Err(e) => {
            writeln!(out, "[Error]: {}", e)?;
            writeln!(out, "{}", e.code())?;
            Ok(e.code())
        }
    }
}

fn walk<R: Read, W: Write>(input: &mut FieldReader<R>, out: &mut W) -> Result<()> {
    let magic = input.read_u32()?;
    writeln!(out, "magic: {:#010X}", magic)?;
    if magic != MAGIC {
        return Err(PensieveError::not_a_container(magic));
    }

    let major = input.read_u16()?;
    let minor = input.read_u16()?;
    writeln!(out, "version: {}.{}", major, minor)?;

    match FormatVersion::from_major(major)? {
        FormatVersion::V1 => walk_v1(input, out),
    }
}

fn walk_v1<R: Read, W: Write>(input: &mut FieldReader<R>, out: &mut W) -> Result<()> {
    let mut crc = Crc32::new();

    let data_length = input.read_u64_checked(&mut crc)?;
    writeln!(out, "data length: {}", data_length)?;
    let files_count = input.read_u32_checked(&mut crc)?;
    writeln!(out, "files count: {}", files_count)?;

    for _ in 0..files_count {
        let name_len = input.read_u16_checked(&mut crc)?;
        writeln!(out, "filename size: {}", name_len)?;
        let name = input.read_bytes_checked(name_len as usize, &mut crc)?;
        writeln!(out, "filename: `{}`", String::from_utf8_lossy(&name))?;
        let offset = input.read_u64_checked(&mut crc)?;
        writeln!(out, "file offset: {}", offset)?;
    }

    let stored = input.read_u32()?;
    let computed = crc.finalize();
    if stored != computed {
        return Err(PensieveError::header_corrupted(stored, computed));
    }
    writeln!(out, "header crc: {:#010X} (ok)", stored)?;

    writeln!(out, "[BINARY CHUNKS SECTION]")?;
    let mut acc = 0u64;
    for _ in 0..files_count {
        let size = input.read_u64()?;
        writeln!(out, "chunk size: {}", size)?;
        writeln!(out, "chunk offset: {}", acc)?;

        let shown = size.min(PREVIEW_LEN);
        let head = input.read_bytes(shown as usize)?;
        input.pipe_exact(size - shown, &mut io::sink())?;
        let ellipsis = if size > shown { "..." } else { "" };
        writeln!(
            out,
            "chunk data: `{}`{}",
            String::from_utf8_lossy(&head).escape_debug(),
            ellipsis
        )?;

        acc += size + CHUNK_SIZE_FIELD;
    }

    Ok(())
}
