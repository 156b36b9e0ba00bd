//! The path table.
//!
//! The table is an index-stable arena of `(name, content slot)` entries.
//! Removing a path blanks its name, turning the entry into a tombstone that
//! a later `create` may recycle; indices never shift, so a [`Handle`] to an
//! unrelated live entry stays valid across removals.

use pensieve_core::path::pattern_match;
use tracing::trace;

/// Opaque reference to a path table entry.
///
/// A handle says nothing about whether the entry is still live: if the path
/// it was obtained for is removed and its slot recycled, the handle now
/// designates the new occupant. Handles are scoped to the container that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Index into the path table.
    pub entry_index: usize,
}

impl Handle {
    /// The "no such entry" sentinel.
    pub const INVALID: Self = Self {
        entry_index: usize::MAX,
    };

    /// Whether this handle designates an entry at all.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// `Some(self)` unless this is the sentinel.
    pub fn valid(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}

/// One row of the path table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Virtual path, empty for a tombstone.
    pub name: String,
    /// Index of the content buffer this entry owns.
    pub content_slot: usize,
}

impl TableEntry {
    /// Whether this entry has been removed.
    pub fn is_tombstone(&self) -> bool {
        self.name.is_empty()
    }
}

/// Ordered path → content slot mapping with tombstone reuse.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    entries: Vec<TableEntry>,
    tombstones: usize,
}

impl PathTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path`, recycling the lowest tombstone if there is one.
    ///
    /// Duplicates are not checked here; the container decides whether they
    /// are allowed.
    pub fn create(&mut self, path: &str, content_slot: usize) -> Handle {
        if self.tombstones > 0 {
            if let Some(index) = self.entries.iter().position(TableEntry::is_tombstone) {
                self.tombstones -= 1;
                let entry = &mut self.entries[index];
                entry.name = path.to_owned();
                entry.content_slot = content_slot;
                trace!(index, content_slot, "recycled tombstone for {}", path);
                return Handle { entry_index: index };
            }
        }

        self.entries.push(TableEntry {
            name: path.to_owned(),
            content_slot,
        });
        Handle {
            entry_index: self.entries.len() - 1,
        }
    }

    /// Find the first live entry named exactly `path`.
    pub fn lookup(&self, path: &str) -> Handle {
        self.entries
            .iter()
            .position(|e| !e.is_tombstone() && e.name == path)
            .map_or(Handle::INVALID, |entry_index| Handle { entry_index })
    }

    /// Tombstone the entry named `path` and return the content slot it owned.
    pub fn remove(&mut self, path: &str) -> Option<usize> {
        let handle = self.lookup(path).valid()?;
        let entry = &mut self.entries[handle.entry_index];
        entry.name.clear();
        self.tombstones += 1;
        Some(entry.content_slot)
    }

    /// Handles of every entry whose name matches `pattern`, in table order.
    pub fn match_all(&self, pattern: &str) -> Vec<Handle> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| pattern_match(pattern, &e.name))
            .map(|(entry_index, _)| Handle { entry_index })
            .collect()
    }

    /// The entry a handle designates.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range for this table.
    pub fn entry(&self, handle: Handle) -> &TableEntry {
        assert!(
            handle.entry_index < self.entries.len(),
            "handle {} out of range for path table of {} entries",
            handle.entry_index,
            self.entries.len()
        );
        &self.entries[handle.entry_index]
    }

    /// Live entries with their handles, in table order.
    pub fn live_entries(&self) -> impl Iterator<Item = (Handle, &TableEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_tombstone())
            .map(|(entry_index, e)| (Handle { entry_index }, e))
    }

    /// Total number of entries, tombstones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tombstoned entries.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Number of live entries.
    pub fn live_count(&self) -> usize {
        self.entries.len() - self.tombstones
    }
}
