//! Folder handle operations
//!
//! A [`FolderHandle`] references one directory by path. Like its file
//! counterpart it owns only the path; every operation re-checks the live
//! directory. `move_to` and `rename` update the handle's path in place.

use log::{error, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_FOLDER_MODE;
use crate::error::{FsError, Result};

/// A handle to one directory
#[derive(Debug, Clone, PartialEq)]
pub struct FolderHandle {
    path: PathBuf,
}

impl FolderHandle {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FolderHandle { path: path.into() }
    }

    /// The current path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory tree with the default mode (0o775)
    pub fn create(&self) -> Result<()> {
        self.create_with_mode(DEFAULT_FOLDER_MODE)
    }

    /// Create the directory tree if missing, then (re)apply `mode`
    ///
    /// The mode is applied even when the directory already existed.
    pub fn create_with_mode(&self, mode: u32) -> Result<()> {
        if !self.path.is_dir() {
            create_dir_tree(&self.path, mode).map_err(|e| {
                error!("Failed to create folder at {}: {}", self.path.display(), e);
                FsError::Io(e)
            })?;
        }
        apply_mode(&self.path, mode).map_err(|e| {
            error!(
                "Failed to change permissions of {} to {:o}: {}",
                self.path.display(),
                mode,
                e
            );
            FsError::Io(e)
        })?;
        Ok(())
    }

    /// Delete the directory
    ///
    /// With `force` the directory and all its contents are removed (absent
    /// directories are ignored); without it only an empty directory is
    /// removed and the underlying removal error is surfaced otherwise.
    pub fn delete(&self, force: bool) -> Result<()> {
        if force {
            if self.path.is_dir() {
                fs::remove_dir_all(&self.path).map_err(|e| {
                    error!("Failed to delete folder at {}: {}", self.path.display(), e);
                    FsError::Io(e)
                })?;
                info!("Deleted folder {}", self.path.display());
            }
            return Ok(());
        }

        fs::remove_dir(&self.path).map_err(|e| {
            error!("Failed to delete folder at {}: {}", self.path.display(), e);
            FsError::Io(e)
        })?;
        info!("Deleted folder {}", self.path.display());
        Ok(())
    }

    /// Whether the path currently exists as a directory
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Entry names in ascending order, hidden entries excluded
    ///
    /// Entries whose names start with `.` are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.path.is_dir() {
            return Err(FsError::NotFound(format!(
                "cannot scan folder at '{}' as the folder does not exist",
                self.path.display()
            )));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(FsError::Io)? {
            let entry = entry.map_err(FsError::Io)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') {
                entries.push(name);
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Duplicate the whole tree to `destination`
    ///
    /// With `overwrite` an existing destination is fully removed first.
    /// Returns a handle bound to the destination.
    pub fn copy<P: AsRef<Path>>(&self, destination: P, overwrite: bool) -> Result<FolderHandle> {
        let destination = destination.as_ref();

        if !self.path.is_dir() {
            return Err(FsError::NotFound(format!(
                "cannot copy '{}' to '{}' as the source folder does not exist",
                self.path.display(),
                destination.display()
            )));
        }
        if destination.is_dir() {
            if !overwrite {
                return Err(FsError::Conflict(format!(
                    "cannot copy '{}' to '{}' as the destination folder already exists",
                    self.path.display(),
                    destination.display()
                )));
            }
            fs::remove_dir_all(destination).map_err(FsError::Io)?;
        }

        copy_tree(&self.path, destination).map_err(|e| {
            error!(
                "Failed to copy folder {} to {}: {}",
                self.path.display(),
                destination.display(),
                e
            );
            FsError::Io(e)
        })?;

        info!(
            "Copied folder {} to {}",
            self.path.display(),
            destination.display()
        );
        Ok(FolderHandle::new(destination.to_path_buf()))
    }

    /// Relocate the tree to `destination`
    ///
    /// With `overwrite` an existing destination is removed first. Falls back
    /// to copy-and-delete when the rename crosses filesystems. On success the
    /// handle's path points at the destination.
    pub fn move_to<P: AsRef<Path>>(&mut self, destination: P, overwrite: bool) -> Result<()> {
        let destination = destination.as_ref().to_path_buf();

        if !self.path.is_dir() {
            return Err(FsError::NotFound(format!(
                "cannot move '{}' to '{}' as the source folder does not exist",
                self.path.display(),
                destination.display()
            )));
        }
        if destination.is_dir() {
            if !overwrite {
                return Err(FsError::Conflict(format!(
                    "cannot move '{}' to '{}' as the destination folder already exists",
                    self.path.display(),
                    destination.display()
                )));
            }
            fs::remove_dir_all(&destination).map_err(FsError::Io)?;
        }

        relocate_tree(&self.path, &destination)?;
        info!(
            "Moved folder {} to {}",
            self.path.display(),
            destination.display()
        );
        self.path = destination;
        Ok(())
    }

    /// Alias for [`move_to`](Self::move_to)
    ///
    /// Takes a full destination path, unlike
    /// [`FileHandle::rename`](crate::file::FileHandle::rename) which is
    /// basename-only.
    pub fn rename<P: AsRef<Path>>(&mut self, destination: P, overwrite: bool) -> Result<()> {
        self.move_to(destination, overwrite)
    }

    /// Change the owner (and optionally the group) of the directory entry
    ///
    /// Non-recursive. Same verified-rollback contract as
    /// [`FileHandle::owner`](crate::file::FileHandle::owner).
    #[cfg(unix)]
    pub fn owner(&self, user: &str, group: Option<&str>) -> Result<()> {
        if !self.path.is_dir() {
            return Err(FsError::NotFound(format!(
                "cannot change owner of folder at '{}' as the folder does not exist",
                self.path.display()
            )));
        }
        crate::utils::owner::change_owner(&self.path, user, group)
    }

    /// Change the directory mode, non-recursive
    #[cfg(unix)]
    pub fn permissions(&self, mode: u32) -> Result<()> {
        if !self.path.is_dir() {
            return Err(FsError::NotFound(format!(
                "cannot change permissions of the folder at '{}' as the folder does not exist",
                self.path.display()
            )));
        }
        apply_mode(&self.path, mode).map_err(|e| {
            error!(
                "Failed to change permissions of {} to {:o}: {}",
                self.path.display(),
                mode,
                e
            );
            FsError::Io(e)
        })?;
        info!(
            "Changed permissions of {} to {:o}",
            self.path.display(),
            mode
        );
        Ok(())
    }
}

impl fmt::Display for FolderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Create a directory and its missing parents with `mode`
#[cfg(unix)]
pub(crate) fn create_dir_tree(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(mode).create(path)
}

#[cfg(not(unix))]
pub(crate) fn create_dir_tree(path: &Path, _mode: u32) -> io::Result<()> {
    fs::DirBuilder::new().recursive(true).create(path)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Recursively duplicate a directory tree
fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Rename with a recursive copy-and-delete fallback across filesystems
fn relocate_tree(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if crate::utils::is_cross_device(&e) => {
            copy_tree(from, to).map_err(FsError::Io)?;
            fs::remove_dir_all(from).map_err(FsError::Io)?;
            Ok(())
        }
        Err(e) => {
            error!(
                "Failed to move folder from {} to {}: {}",
                from.display(),
                to.display(),
                e
            );
            Err(FsError::Io(e))
        }
    }
}
