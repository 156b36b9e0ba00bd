//! Saving to and loading from real files.

use pensieve_archive::Pensieve;
use pensieve_core::{ErrorCode, PensieveError};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn sample() -> Pensieve {
    let mut archive = Pensieve::new();
    for (path, data) in [
        ("/config/app.toml", &b"[app]\nname = \"demo\"\n"[..]),
        ("/assets/icon.png", &[0x89, b'P', b'N', b'G', 0, 1, 2, 3][..]),
    ] {
        let handle = archive.create(path);
        archive.content_mut(handle).write_all(data).unwrap();
    }
    archive
}

#[test]
fn test_save_and_load_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bundle.pnsv");

    let archive = sample();
    archive.save_to_path(&path).unwrap();

    let loaded = Pensieve::load_from_path(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    let icon = loaded.open("/assets/icon.png");
    assert_eq!(loaded.content(icon).as_bytes(), &[0x89, b'P', b'N', b'G', 0, 1, 2, 3]);

    let mut in_memory = Vec::new();
    archive.write_to(&mut in_memory).unwrap();
    assert_eq!(fs::read(&path).unwrap(), in_memory);
}

#[test]
fn test_save_truncates_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bundle.pnsv");
    fs::write(&path, vec![0xAB; 4096]).unwrap();

    let mut archive = sample();
    archive.remove("/config/app.toml");
    archive.save_to_path(&path).unwrap();

    let loaded = Pensieve::load_from_path(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(fs::metadata(&path).unwrap().len() < 4096);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.pnsv");

    let err = Pensieve::load_from_path(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileDoesNotExist);
    match err {
        PensieveError::FileDoesNotExist { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_foreign_file_is_not_a_container() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"just some text, not a container").unwrap();

    let result = Pensieve::load_from_path(&path);
    assert_eq!(ErrorCode::of(&result), ErrorCode::NotAContainer);
}

#[test]
fn test_empty_file_is_corrupted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.pnsv");
    fs::write(&path, b"").unwrap();

    let result = Pensieve::load_from_path(&path);
    assert_eq!(ErrorCode::of(&result), ErrorCode::FileCorrupted);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/bundle.pnsv");

    let err = sample().save_to_path(&path).unwrap_err();
    assert!(matches!(err, PensieveError::Io(_)));
}
