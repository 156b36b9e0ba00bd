//! Damaged streams must be rejected with the right result kind.

use pensieve_archive::{MAGIC, MAJOR, Pensieve};
use pensieve_core::crc::crc32;
use pensieve_core::{ErrorCode, PensieveError};
use std::io::Write;
use std::ops::Range;

const FILES: &[(&str, &[u8])] = &[
    ("/usr/data", b"abc"),
    ("/usr/bin/x.exe", b"hello"),
    ("/share/doc/readme", b""),
];

fn saved() -> Vec<u8> {
    let mut archive = Pensieve::new();
    for (path, data) in FILES {
        let handle = archive.create(path);
        archive.content_mut(handle).write_all(data).unwrap();
    }
    let mut bytes = Vec::new();
    archive.write_to(&mut bytes).unwrap();
    bytes
}

/// Byte ranges of the header fields of `saved()`.
struct Layout {
    data_length: Range<usize>,
    count: Range<usize>,
    name_lengths: Vec<Range<usize>>,
    names: Vec<Range<usize>>,
    offsets: Vec<Range<usize>>,
    crc: Range<usize>,
}

fn layout() -> Layout {
    let mut pos = 20;
    let mut name_lengths = Vec::new();
    let mut names = Vec::new();
    let mut offsets = Vec::new();
    for (path, _) in FILES {
        name_lengths.push(pos..pos + 2);
        pos += 2;
        names.push(pos..pos + path.len());
        pos += path.len();
        offsets.push(pos..pos + 8);
        pos += 8;
    }
    Layout {
        data_length: 8..16,
        count: 16..20,
        name_lengths,
        names,
        offsets,
        crc: pos..pos + 4,
    }
}

fn load(bytes: &[u8]) -> Result<Pensieve, PensieveError> {
    Pensieve::read_from(bytes)
}

fn flipped(bytes: &[u8], at: usize) -> Vec<u8> {
    let mut copy = bytes.to_vec();
    copy[at] ^= 0xFF;
    copy
}

#[test]
fn test_wire_layout() {
    let bytes = saved();
    let layout = layout();

    assert_eq!(&bytes[0..4], &MAGIC.to_le_bytes());
    assert_eq!(&bytes[4..6], &MAJOR.to_le_bytes());
    assert_eq!(&bytes[layout.data_length.clone()], &8u64.to_le_bytes());
    assert_eq!(&bytes[layout.count.clone()], &3u32.to_le_bytes());
    assert_eq!(&bytes[layout.names[1].clone()], b"/usr/bin/x.exe");

    // cumulative offsets advance by content length plus the size field
    let offsets: Vec<u64> = layout
        .offsets
        .iter()
        .map(|r| u64::from_le_bytes(bytes[r.clone()].try_into().unwrap()))
        .collect();
    assert_eq!(offsets, vec![0, 3 + 8, 3 + 8 + 5 + 8]);

    // the checksum covers everything from data length up to itself
    let stored = u32::from_le_bytes(bytes[layout.crc.clone()].try_into().unwrap());
    assert_eq!(stored, crc32(&bytes[8..layout.crc.start]));

    // chunks follow in table order
    let data = &bytes[layout.crc.end..];
    assert_eq!(&data[0..8], &3u64.to_le_bytes());
    assert_eq!(&data[8..11], b"abc");
    assert_eq!(&data[11..19], &5u64.to_le_bytes());
    assert_eq!(&data[19..24], b"hello");
    assert_eq!(&data[24..32], &0u64.to_le_bytes());
    assert_eq!(data.len(), 32);
}

#[test]
fn test_magic_flip_is_not_a_container() {
    let bytes = saved();
    for at in 0..4 {
        let err = load(&flipped(&bytes, at)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAContainer, "byte {}", at);
    }
}

#[test]
fn test_major_flip_is_incompatible() {
    let bytes = saved();
    for at in 4..6 {
        let err = load(&flipped(&bytes, at)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IncompatibleMajorVersion, "byte {}", at);
    }
}

#[test]
fn test_minor_version_is_ignored() {
    let bytes = saved();
    let loaded = load(&flipped(&bytes, 6)).unwrap();
    assert_eq!(loaded.len(), FILES.len());
}

#[test]
fn test_checksummed_field_flip_is_header_corrupted() {
    let bytes = saved();
    let layout = layout();

    let mut positions: Vec<usize> = layout.data_length.clone().collect();
    for range in layout.names.iter().chain(&layout.offsets) {
        positions.extend(range.clone());
    }
    positions.extend(layout.crc.clone());

    for at in positions {
        let err = load(&flipped(&bytes, at)).unwrap_err();
        assert!(
            matches!(err, PensieveError::HeaderCorrupted { .. }),
            "byte {}: {}",
            at,
            err
        );
    }
}

#[test]
fn test_length_field_flip_is_rejected() {
    let bytes = saved();
    let layout = layout();

    let mut positions: Vec<usize> = layout.count.clone().collect();
    for range in &layout.name_lengths {
        positions.extend(range.clone());
    }

    // a damaged length either runs off the stream or desyncs the checksum
    for at in positions {
        let code = ErrorCode::of(&load(&flipped(&bytes, at)));
        assert!(
            code == ErrorCode::HeaderCorrupted || code == ErrorCode::FileCorrupted,
            "byte {}: code {}",
            at,
            code
        );
    }
}

#[test]
fn test_truncation_is_file_corrupted() {
    let bytes = saved();
    for len in 0..bytes.len() {
        let err = load(&bytes[..len]).unwrap_err();
        assert!(
            matches!(err, PensieveError::FileCorrupted { .. }),
            "truncated to {}: {}",
            len,
            err
        );
    }
}

#[test]
fn test_oversized_chunk_length_is_file_corrupted() {
    let mut bytes = saved();
    let chunk_size_at = layout().crc.end;
    bytes[chunk_size_at..chunk_size_at + 8].copy_from_slice(&u64::MAX.to_le_bytes());

    let err = load(&bytes).unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileCorrupted);
}

#[test]
fn test_future_major_version() {
    let mut bytes = saved();
    bytes[4..6].copy_from_slice(&(MAJOR + 1).to_le_bytes());
    match load(&bytes).unwrap_err() {
        PensieveError::IncompatibleMajorVersion { found, supported } => {
            assert_eq!(found, MAJOR + 1);
            assert_eq!(supported, MAJOR);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_name_after_good_checksum() {
    let mut bytes = saved();
    let layout = layout();

    // rewrite the first name into a relative path and fix up the checksum
    bytes[layout.names[0].start] = b'u';
    let crc = crc32(&bytes[8..layout.crc.start]);
    bytes[layout.crc.clone()].copy_from_slice(&crc.to_le_bytes());

    let err = load(&bytes).unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileCorrupted);
}

#[test]
fn test_non_utf8_name_after_good_checksum() {
    let mut bytes = saved();
    let layout = layout();

    bytes[layout.names[0].start + 1] = 0xFF;
    let crc = crc32(&bytes[8..layout.crc.start]);
    bytes[layout.crc.clone()].copy_from_slice(&crc.to_le_bytes());

    let err = load(&bytes).unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileCorrupted);
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut bytes = saved();
    bytes.extend_from_slice(b"junk");
    assert_eq!(load(&bytes).unwrap().len(), FILES.len());
}
