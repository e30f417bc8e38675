//! File handle operations
//!
//! A [`FileHandle`] references one file by path and performs create, read,
//! write, copy, move and metadata operations against it. The handle owns only
//! its path and the fields derived from it; no descriptor is held between
//! calls. Operations that change the path (`move_to`, `rename`) update the
//! handle in place and recompute the derived fields before returning.

use log::{error, info};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::DEFAULT_FOLDER_MODE;
use crate::error::{FsError, Result};
use crate::folder::handle::create_dir_tree;
use crate::mime::MimeSniffer;
use crate::utils::lock;

/// A handle to one file
///
/// `folder`, `fullname`, `stem` and `extension` are derived from `path` and
/// stay consistent with it after every successful path-changing operation.
/// Handles are plain values; mutating one from several threads at once needs
/// external synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    path: PathBuf,
    folder: PathBuf,
    fullname: String,
    stem: String,
    extension: Option<String>,
}

impl FileHandle {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let mut handle = FileHandle {
            path: PathBuf::new(),
            folder: PathBuf::new(),
            fullname: String::new(),
            stem: String::new(),
            extension: None,
        };
        handle.set_path(path.into());
        handle
    }

    /// The current path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory containing the file
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// File name including the extension
    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    /// File name without the extension
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension without the leading dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Ensure the file exists, creating missing parent directories
    ///
    /// Parent directories are created with mode 0o775. An existing file is
    /// left untouched.
    pub fn create(&self) -> Result<()> {
        if !self.path.exists() {
            self.ensure_parent()?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                error!("Failed to create file at {}: {}", self.path.display(), e);
                FsError::Io(e)
            })?;
        Ok(())
    }

    /// Read the full file content
    pub fn read(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot read '{}' as the file does not exist",
                self.path.display()
            )));
        }
        fs::read(&self.path).map_err(|e| {
            error!("Failed to read file at {}: {}", self.path.display(), e);
            FsError::Io(e)
        })
    }

    /// Read the full file content as UTF-8
    pub fn read_to_string(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot read '{}' as the file does not exist",
                self.path.display()
            )));
        }
        fs::read_to_string(&self.path).map_err(|e| {
            error!("Failed to read file at {}: {}", self.path.display(), e);
            FsError::Io(e)
        })
    }

    /// Replace the file content, creating the file and parents if necessary
    ///
    /// Holds an exclusive advisory lock for the duration of the write.
    pub fn write<C: AsRef<[u8]>>(&self, content: C) -> Result<()> {
        if !self.path.exists() {
            self.create()?;
        }
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                error!("Failed to open {} for writing: {}", self.path.display(), e);
                FsError::Io(e)
            })?;
        self.write_locked(file, content.as_ref())?;
        info!(
            "Wrote {} bytes to {}",
            content.as_ref().len(),
            self.path.display()
        );
        Ok(())
    }

    /// Append to the file, creating the file and parents if necessary
    ///
    /// Same locking behavior as [`write`](Self::write).
    pub fn append<C: AsRef<[u8]>>(&self, content: C) -> Result<()> {
        if !self.path.exists() {
            self.create()?;
        }
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                error!("Failed to open {} for appending: {}", self.path.display(), e);
                FsError::Io(e)
            })?;
        self.write_locked(file, content.as_ref())?;
        info!(
            "Appended {} bytes to {}",
            content.as_ref().len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the file as newline-stripped lines, in order
    pub fn lines(&self) -> Result<Vec<String>> {
        let content = self.read_to_string()?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Duplicate the file content to `destination`
    ///
    /// The destination's parent directories are not created; the source handle
    /// is unaffected. Returns a handle bound to the destination.
    pub fn copy<P: AsRef<Path>>(&self, destination: P, overwrite: bool) -> Result<FileHandle> {
        let destination = destination.as_ref();

        if !overwrite && destination.exists() {
            return Err(FsError::Conflict(format!(
                "cannot copy '{}' to '{}' as the destination file already exists",
                self.path.display(),
                destination.display()
            )));
        }
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot copy '{}' to '{}' as the source file does not exist",
                self.path.display(),
                destination.display()
            )));
        }

        fs::copy(&self.path, destination).map_err(|e| {
            error!(
                "Failed to copy {} to {}: {}",
                self.path.display(),
                destination.display(),
                e
            );
            FsError::Io(e)
        })?;

        info!("Copied {} to {}", self.path.display(), destination.display());
        Ok(FileHandle::new(destination.to_path_buf()))
    }

    /// Relocate the file to `destination`, creating its parent directories
    ///
    /// Falls back to copy-and-delete when the rename crosses filesystems. On
    /// success the handle's path and derived fields point at the destination.
    pub fn move_to<P: AsRef<Path>>(&mut self, destination: P, overwrite: bool) -> Result<()> {
        let destination = destination.as_ref().to_path_buf();

        if !overwrite && destination.exists() {
            return Err(FsError::Conflict(format!(
                "cannot move '{}' to '{}' as the destination file already exists",
                self.path.display(),
                destination.display()
            )));
        }
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot move '{}' to '{}' as the source file does not exist",
                self.path.display(),
                destination.display()
            )));
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                create_dir_tree(parent, DEFAULT_FOLDER_MODE).map_err(|e| {
                    error!("Failed to create folder at {}: {}", parent.display(), e);
                    FsError::Io(e)
                })?;
            }
        }

        relocate_file(&self.path, &destination)?;
        info!("Moved {} to {}", self.path.display(), destination.display());
        self.set_path(destination);
        Ok(())
    }

    /// Rename the file within its current directory
    ///
    /// The destination is always `(parent of current path)/basename(new_name)`;
    /// any directory component in `new_name` is discarded. Contrast with
    /// [`FolderHandle::rename`](crate::folder::FolderHandle::rename), which
    /// takes a full destination path.
    pub fn rename(&mut self, new_name: &str, overwrite: bool) -> Result<()> {
        let Some(basename) = Path::new(new_name).file_name() else {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' does not contain a usable file name", new_name),
            )));
        };
        let destination = self.folder.join(basename);

        if !overwrite && destination.exists() {
            return Err(FsError::Conflict(format!(
                "cannot rename '{}' to '{}' as a file with that name already exists",
                self.path.display(),
                destination.display()
            )));
        }
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot rename '{}' to '{}' as the file does not exist",
                self.path.display(),
                destination.display()
            )));
        }

        fs::rename(&self.path, &destination).map_err(|e| {
            error!(
                "Failed to rename {} to {}: {}",
                self.path.display(),
                destination.display(),
                e
            );
            FsError::Io(e)
        })?;

        info!(
            "Renamed {} to {}",
            self.path.display(),
            destination.display()
        );
        self.set_path(destination);
        Ok(())
    }

    /// Delete the file; absent files are ignored
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                error!("Failed to delete file at {}: {}", self.path.display(), e);
                FsError::Io(e)
            })?;
            info!("Deleted file {}", self.path.display());
        }
        Ok(())
    }

    /// Whether the path currently exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Change the owner (and optionally the group) of the file
    ///
    /// If the group change fails after the owner was changed, the original
    /// owner and group are restored and the restore is verified; a failed
    /// restore escalates to `FsError::RollbackFailed`.
    #[cfg(unix)]
    pub fn owner(&self, user: &str, group: Option<&str>) -> Result<()> {
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot change owner of '{}' as the file does not exist",
                self.path.display()
            )));
        }
        crate::utils::owner::change_owner(&self.path, user, group)
    }

    /// Change the file mode
    ///
    /// No rollback is attempted on failure, unlike [`owner`](Self::owner).
    #[cfg(unix)]
    pub fn permissions(&self, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot change permissions of '{}' as the file does not exist",
                self.path.display()
            )));
        }
        fs::set_permissions(&self.path, fs::Permissions::from_mode(mode)).map_err(|e| {
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

    /// A mime sniffer bound to this file's path
    pub fn mime(&self) -> Result<MimeSniffer> {
        MimeSniffer::new(&self.path)
    }

    /// Last modification time of the file
    pub fn modified_time(&self) -> Result<SystemTime> {
        if !self.path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot read modification time of '{}' as the file does not exist",
                self.path.display()
            )));
        }
        let metadata = fs::metadata(&self.path)?;
        Ok(metadata.modified()?)
    }

    /// Update the path and recompute the derived fields
    fn set_path(&mut self, path: PathBuf) {
        self.folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.fullname = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.extension = path.extension().map(|e| e.to_string_lossy().into_owned());
        self.path = path;
    }

    fn ensure_parent(&self) -> Result<()> {
        if !self.folder.as_os_str().is_empty() && !self.folder.is_dir() {
            create_dir_tree(&self.folder, DEFAULT_FOLDER_MODE).map_err(|e| {
                error!(
                    "Failed to create folder at {}: {}",
                    self.folder.display(),
                    e
                );
                FsError::Io(e)
            })?;
        }
        Ok(())
    }

    fn write_locked(&self, mut file: fs::File, content: &[u8]) -> Result<()> {
        lock::lock_exclusive(&file)?;
        let outcome = file.write_all(content).and_then(|_| file.flush());
        let unlocked = lock::unlock(&file);
        outcome.map_err(|e| {
            error!("Failed to write to {}: {}", self.path.display(), e);
            FsError::Io(e)
        })?;
        unlocked?;
        Ok(())
    }
}

/// Rename with a copy-and-delete fallback for cross-filesystem moves
fn relocate_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if crate::utils::is_cross_device(&e) => {
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(())
        }
        Err(e) => {
            error!(
                "Failed to move file from {} to {}: {}",
                from.display(),
                to.display(),
                e
            );
            Err(FsError::Io(e))
        }
    }
}
