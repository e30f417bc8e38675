//! Error types
//!
//! Defines the error kinds raised by filesystem handles, the path sanitizer
//! and the configuration loader.

use std::fmt;
use std::io;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors raised by filesystem operations
///
/// Every variant carries a message naming the operation and the path(s)
/// involved, so callers get a usable diagnostic without string matching.
#[derive(Debug)]
pub enum FsError {
    /// The operation target does not exist where existence is required
    NotFound(String),
    /// The destination already exists and overwrite was not requested
    Conflict(String),
    /// The root path was not established or is invalid
    Configuration(String),
    /// A sanitized path would escape the configured root
    Traversal(String),
    /// An owner change failed and restoring the original owner also failed;
    /// the on-disk state is unknown
    RollbackFailed(String),
    /// The underlying OS call failed
    Io(io::Error),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FsError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            FsError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            FsError::Traversal(msg) => write!(f, "Path traversal attempt: {}", msg),
            FsError::RollbackFailed(msg) => write!(f, "Rollback failed: {}", msg),
            FsError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FsError {}

impl From<io::Error> for FsError {
    fn from(error: io::Error) -> Self {
        FsError::Io(error)
    }
}

impl FsError {
    /// True when the error was caused by a missing target
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    /// True when the error was caused by an existing destination
    pub fn is_conflict(&self) -> bool {
        matches!(self, FsError::Conflict(_))
    }
}
