//! The archive container.
//!
//! [`Pensieve`] owns a [`PathTable`] and an append-only sequence of
//! [`ContentBuffer`]s. Table entries are recycled after removal; content
//! slots are not, a removed file's buffer is only emptied.
//!
//! # Example
//!
//! ```
//! use pensieve_archive::Pensieve;
//! use std::io::Write;
//!
//! let mut archive = Pensieve::new();
//! let handle = archive.create("/assets/logo.svg");
//! archive.content_mut(handle).write_all(b"<svg/>").unwrap();
//!
//! let mut bytes = Vec::new();
//! archive.write_to(&mut bytes).unwrap();
//!
//! let loaded = Pensieve::read_from(bytes.as_slice()).unwrap();
//! let handle = loaded.open("/assets/logo.svg");
//! assert_eq!(loaded.content(handle).as_bytes(), b"<svg/>");
//! ```

use crate::content::ContentBuffer;
use crate::format;
use crate::header::{Handle, PathTable};
use pensieve_core::error::{PensieveError, Result};
use pensieve_core::path::valid_path;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// A set of named binary blobs addressed by virtual path.
#[derive(Debug, Clone, Default)]
pub struct Pensieve {
    table: PathTable,
    contents: Vec<ContentBuffer>,
}

impl Pensieve {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path`, creating an empty file first if it does not exist.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid virtual path.
    pub fn create_open(&mut self, path: &str) -> Handle {
        assert_valid(path);
        match self.table.lookup(path).valid() {
            Some(handle) => handle,
            None => self.allocate(path),
        }
    }

    /// Create an empty file at `path`.
    ///
    /// Returns [`Handle::INVALID`] if the path is already taken.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid virtual path.
    pub fn create(&mut self, path: &str) -> Handle {
        assert_valid(path);
        if self.table.lookup(path).is_valid() {
            return Handle::INVALID;
        }
        self.allocate(path)
    }

    /// Look up `path`. Returns [`Handle::INVALID`] if it does not exist.
    pub fn open(&self, path: &str) -> Handle {
        self.table.lookup(path)
    }

    /// Whether a file exists at `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid virtual path.
    pub fn exists(&self, path: &str) -> bool {
        assert_valid(path);
        self.table.lookup(path).is_valid()
    }

    /// Empty the file behind `handle`. The handle stays valid.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range for this container.
    pub fn clear(&mut self, handle: Handle) {
        let slot = self.table.entry(handle).content_slot;
        self.contents[slot].clear();
    }

    /// Remove the file at `path`, releasing its bytes.
    ///
    /// Returns `false` if nothing was there.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid virtual path.
    pub fn remove(&mut self, path: &str) -> bool {
        assert_valid(path);
        match self.table.remove(path) {
            Some(slot) => {
                self.contents[slot].reset();
                debug!(slot, "removed {}", path);
                true
            }
            None => false,
        }
    }

    /// Virtual path of the entry behind `handle`.
    ///
    /// A recycled handle reports its current occupant; a tombstone reports
    /// the empty string.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range for this container.
    pub fn name(&self, handle: Handle) -> &str {
        &self.table.entry(handle).name
    }

    /// Content of the file behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range for this container.
    pub fn content(&self, handle: Handle) -> &ContentBuffer {
        let slot = self.table.entry(handle).content_slot;
        &self.contents[slot]
    }

    /// Mutable content of the file behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range for this container.
    pub fn content_mut(&mut self, handle: Handle) -> &mut ContentBuffer {
        let slot = self.table.entry(handle).content_slot;
        &mut self.contents[slot]
    }

    /// Handles of all files whose path matches `pattern`, in table order.
    pub fn matches(&self, pattern: &str) -> Vec<Handle> {
        self.table.match_all(pattern)
    }

    /// Handles of all live files, in table order.
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.table.live_entries().map(|(handle, _)| handle)
    }

    /// Sum of the byte lengths of every content buffer.
    pub fn total_content_size(&self) -> u64 {
        self.contents.iter().map(|c| c.len() as u64).sum()
    }

    /// Number of live files.
    pub fn len(&self) -> usize {
        self.table.live_count()
    }

    /// Whether the container holds no live files.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying path table.
    pub fn table(&self) -> &PathTable {
        &self.table
    }

    /// Serialize the container into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let written = format::write_container(&self.table, &self.contents, writer)?;
        debug!(bytes = written, files = self.len(), "container saved");
        Ok(())
    }

    /// Deserialize a container from `reader`.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let (table, contents) = format::read_container(reader)?;
        Ok(Self { table, contents })
    }

    /// Save the container to a file, replacing any previous content.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a container from a file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|e| PensieveError::file_does_not_exist(path, e))?;
        debug!("loading {}", path.display());
        Self::read_from(BufReader::new(file))
    }

    fn allocate(&mut self, path: &str) -> Handle {
        self.contents.push(ContentBuffer::new());
        self.table.create(path, self.contents.len() - 1)
    }
}

fn assert_valid(path: &str) {
    assert!(valid_path(path), "invalid virtual path {:?}", path);
}
