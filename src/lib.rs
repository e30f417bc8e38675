//! fs-handles - ergonomic handles over native file and folder operations
//!
//! Stateful [`FileHandle`] and [`FolderHandle`] value types wrap the usual
//! filesystem primitives with existence checks and typed errors, a
//! [`PathSanitizer`] confines untrusted relative paths to a configured root,
//! and a [`MimeSniffer`] classifies file content. All operations are
//! synchronous, blocking calls; no OS resource is held between them.

pub mod config;
pub mod error;
pub mod file;
pub mod folder;
pub mod mime;
pub mod path;
pub mod utils;

pub use config::FsConfig;
pub use error::{FsError, Result};
pub use file::FileHandle;
pub use folder::FolderHandle;
pub use mime::MimeSniffer;
pub use path::PathSanitizer;

use std::path::PathBuf;

/// Construct a file handle for `path`
pub fn file<P: Into<PathBuf>>(path: P) -> FileHandle {
    FileHandle::new(path)
}

/// Construct a folder handle for `path`
pub fn folder<P: Into<PathBuf>>(path: P) -> FolderHandle {
    FolderHandle::new(path)
}
