//! Error types for Pensieve operations.
//!
//! Loading a container is fail-fast: the first anomaly aborts the whole load
//! and is reported as one of the variants below. [`ErrorCode`] flattens them
//! into the closed set of result kinds exposed at the tool boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Pensieve operations.
#[derive(Debug, Error)]
pub enum PensieveError {
    /// The physical file could not be opened for reading.
    #[error("File does not exist: {}", path.display())]
    FileDoesNotExist {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying open error.
        #[source]
        source: io::Error,
    },

    /// A structural read came up short or a field was malformed.
    #[error("File corrupted at offset {offset}: {message}")]
    FileCorrupted {
        /// Byte offset of the field being read.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The stream does not start with the container magic number.
    #[error("Not a pensieve container: magic {found:#010x}")]
    NotAContainer {
        /// Magic number actually found.
        found: u32,
    },

    /// The container's major version is not supported.
    #[error("Incompatible major version {found} (supported up to {supported})")]
    IncompatibleMajorVersion {
        /// Major version found in the stream.
        found: u16,
        /// Highest major version this build can read.
        supported: u16,
    },

    /// The header parsed cleanly but its checksum does not match.
    #[error("Header corrupted: stored CRC {expected:#010x}, computed {computed:#010x}")]
    HeaderCorrupted {
        /// CRC stored in the stream.
        expected: u32,
        /// CRC computed over the header fields.
        computed: u32,
    },

    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for Pensieve operations.
pub type Result<T> = std::result::Result<T, PensieveError>;

impl PensieveError {
    /// Create a file-does-not-exist error.
    pub fn file_does_not_exist(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileDoesNotExist {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupted file error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::FileCorrupted {
            offset,
            message: message.into(),
        }
    }

    /// Create a not-a-container error.
    pub fn not_a_container(found: u32) -> Self {
        Self::NotAContainer { found }
    }

    /// Create an incompatible major version error.
    pub fn incompatible_major(found: u16, supported: u16) -> Self {
        Self::IncompatibleMajorVersion { found, supported }
    }

    /// Create a header checksum mismatch error.
    pub fn header_corrupted(expected: u32, computed: u32) -> Self {
        Self::HeaderCorrupted { expected, computed }
    }

    /// Classify this error into its result kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileDoesNotExist { .. } => ErrorCode::FileDoesNotExist,
            Self::FileCorrupted { .. } | Self::Io(_) => ErrorCode::FileCorrupted,
            Self::NotAContainer { .. } => ErrorCode::NotAContainer,
            Self::IncompatibleMajorVersion { .. } => ErrorCode::IncompatibleMajorVersion,
            Self::HeaderCorrupted { .. } => ErrorCode::HeaderCorrupted,
        }
    }
}

/// Closed set of load result kinds.
///
/// The discriminants are stable and are what the command-line tool prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Success.
    Ok = 0,
    /// Open-for-read failed.
    FileDoesNotExist = 1,
    /// Truncated stream or malformed field.
    FileCorrupted = 2,
    /// Magic number mismatch.
    NotAContainer = 3,
    /// Unknown or unsupported major version.
    IncompatibleMajorVersion = 4,
    /// Header checksum mismatch.
    HeaderCorrupted = 5,
}

impl ErrorCode {
    /// Result kind of an operation outcome.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => e.code(),
        }
    }

    /// Numeric value of this code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::FileDoesNotExist => "file does not exist",
            Self::FileCorrupted => "file corrupted",
            Self::NotAContainer => "magic mismatch, not a pensieve file",
            Self::IncompatibleMajorVersion => "incompatible major file version",
            Self::HeaderCorrupted => "header is corrupted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
