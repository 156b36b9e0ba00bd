//! # Pensieve Core
//!
//! Core components for the Pensieve virtual archive container.
//!
//! This crate provides the building blocks the container is made of:
//!
//! - [`crc`]: Table-driven CRC-32 with incremental ("slurp") updates
//! - [`path`]: Virtual path validation and glob matching
//! - [`stream`]: Little-endian field reader/writer with checksum folding
//! - [`error`]: Error types and the closed set of load result kinds
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Tooling                                             │
//! │     pnsv command-line checker                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     Path table, content buffers, save/load protocol    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     CRC-32, path rules, field codec, errors            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pensieve_core::crc::Crc32;
//! use pensieve_core::path::{pattern_match, valid_path};
//!
//! assert!(valid_path("/assets/textures/grass.png"));
//! assert!(pattern_match("/assets/**/*.png", "/assets/textures/grass.png"));
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod crc;
pub mod error;
pub mod path;
pub mod stream;

// Re-exports for convenience
pub use crc::{Crc32, crc32, crc32_slurp};
pub use error::{ErrorCode, PensieveError, Result};
pub use path::{MAX_PATH_LEN, pattern_match, valid_path};
pub use stream::{FieldReader, FieldWriter};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::crc::Crc32;
    pub use crate::error::{ErrorCode, PensieveError, Result};
    pub use crate::path::{pattern_match, valid_path};
    pub use crate::stream::{FieldReader, FieldWriter};
}
