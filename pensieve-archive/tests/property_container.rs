//! Property-based tests for the container
//!
//! Uses proptest to check the save/load law and handle stability over random
//! file sets and removal sequences.

use pensieve_archive::{Handle, Pensieve};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::io::Write;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_.]{1,8}"
}

fn virtual_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|segs| format!("/{}", segs.join("/")))
}

fn file_set() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(virtual_path(), prop::collection::vec(any::<u8>(), 0..256), 0..24)
}

proptest! {
    #[test]
    fn prop_save_load_roundtrip(
        files in file_set(),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..8)
    ) {
        let mut archive = Pensieve::new();
        for (path, data) in &files {
            let handle = archive.create(path);
            prop_assert!(handle.is_valid());
            archive.content_mut(handle).write_all(data).unwrap();
        }

        let names: Vec<&String> = files.keys().collect();
        let mut expected = files.clone();
        if !names.is_empty() {
            for index in &removals {
                let name = names[index.index(names.len())];
                let was_there = expected.remove(name).is_some();
                prop_assert_eq!(archive.remove(name), was_there);
            }
        }

        let mut bytes = Vec::new();
        archive.write_to(&mut bytes).unwrap();
        let loaded = Pensieve::read_from(bytes.as_slice()).unwrap();

        prop_assert_eq!(loaded.len(), expected.len());
        prop_assert_eq!(loaded.len(), archive.len());
        for (path, data) in &expected {
            let handle = loaded.open(path);
            prop_assert!(handle.is_valid(), "{} lost", path);
            prop_assert_eq!(loaded.content(handle).as_bytes(), data.as_slice());
        }
        for name in files.keys().filter(|n| !expected.contains_key(*n)) {
            prop_assert_eq!(loaded.open(name), Handle::INVALID);
        }
    }

    #[test]
    fn prop_removal_keeps_other_handles(
        files in file_set(),
        victim in any::<prop::sample::Index>(),
        newcomer in virtual_path()
    ) {
        prop_assume!(files.len() >= 2);
        prop_assume!(!files.contains_key(&newcomer));

        let mut archive = Pensieve::new();
        let mut handles = Vec::new();
        for (path, data) in &files {
            let handle = archive.create(path);
            archive.content_mut(handle).write_all(data).unwrap();
            handles.push((path.clone(), handle));
        }

        let (victim_path, victim_handle) = handles.remove(victim.index(handles.len()));
        prop_assert!(archive.remove(&victim_path));

        let fresh = archive.create(&newcomer);
        prop_assert_eq!(fresh, victim_handle);

        for (path, handle) in &handles {
            prop_assert_ne!(*handle, fresh);
            prop_assert_eq!(archive.name(*handle), path.as_str());
            prop_assert_eq!(archive.content(*handle).as_bytes(), files[path].as_slice());
        }
    }

    #[test]
    fn prop_total_size_tracks_live_content(files in file_set()) {
        let mut archive = Pensieve::new();
        for (path, data) in &files {
            let handle = archive.create(path);
            archive.content_mut(handle).write_all(data).unwrap();
        }
        let expected: u64 = files.values().map(|d| d.len() as u64).sum();
        prop_assert_eq!(archive.total_content_size(), expected);

        for path in files.keys() {
            archive.remove(path);
            prop_assert!(!archive.remove(path));
        }
        prop_assert_eq!(archive.total_content_size(), 0);
        prop_assert!(archive.is_empty());
    }
}
