//! # Pensieve Archive
//!
//! The Pensieve container: many path-addressed byte blobs packed into one
//! file.
//!
//! - [`Pensieve`]: the container and its virtual-file operations
//! - [`header`]: the path table, handles and tombstone reuse
//! - [`content`]: per-file byte buffers
//! - [`format`]: the versioned binary format
//!
//! ## Example
//!
//! ```rust,no_run
//! use pensieve_archive::Pensieve;
//! use std::io::Write;
//!
//! let mut archive = Pensieve::new();
//! for name in ["/usr/data", "/usr/bin/tool.exe", "/usr/lib/core.exe"] {
//!     let handle = archive.create(name);
//!     archive.content_mut(handle).write_all(name.as_bytes()).unwrap();
//! }
//! archive.save_to_path("bundle.pnsv").unwrap();
//!
//! let archive = Pensieve::load_from_path("bundle.pnsv").unwrap();
//! for handle in archive.matches("/usr/**/*.exe") {
//!     println!("{}: {} bytes", archive.name(handle), archive.content(handle).len());
//! }
//! ```
//!
//! ## Loading
//!
//! Loading is all-or-nothing. [`Pensieve::read_from`] returns a container
//! only when the whole stream parsed and the header checksum matched; the
//! error's [`ErrorCode`](pensieve_core::ErrorCode) tells what went wrong.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod content;
pub mod format;
pub mod header;
pub mod pensieve;

// Re-exports
pub use content::ContentBuffer;
pub use format::{FormatVersion, MAGIC, MAJOR, MINOR};
pub use header::{Handle, PathTable, TableEntry};
pub use pensieve::Pensieve;
pub use pensieve_core::{ErrorCode, PensieveError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::content::ContentBuffer;
    pub use crate::header::Handle;
    pub use crate::pensieve::Pensieve;
    pub use pensieve_core::prelude::*;
}
