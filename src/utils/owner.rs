//! Ownership changes
//!
//! Applies owner and group changes with a verified rollback: if the group
//! change fails after the owner was already changed, the original owner and
//! group are restored and the restore is checked by re-reading the metadata.

use log::{error, info};
use std::fs;
use std::io;
use std::os::unix::fs::{MetadataExt, chown};
use std::path::Path;

use crate::error::{FsError, Result};
use crate::utils::users;

/// Change the owner, and optionally the group, of `path`
///
/// The caller is expected to have checked that `path` exists.
pub(crate) fn change_owner(path: &Path, user: &str, group: Option<&str>) -> Result<()> {
    let metadata = fs::metadata(path)?;
    let original_uid = metadata.uid();
    let original_gid = metadata.gid();

    let uid = users::uid_for(user)
        .ok_or_else(|| FsError::Io(io::Error::other(format!("unknown user '{}'", user))))?;
    let gid = match group {
        Some(name) => Some(
            users::gid_for(name)
                .ok_or_else(|| FsError::Io(io::Error::other(format!("unknown group '{}'", name))))?,
        ),
        None => None,
    };

    if let Err(e) = chown(path, Some(uid), None) {
        error!(
            "Failed to change owner of {} to {}: {}",
            path.display(),
            user,
            e
        );
        return Err(FsError::Io(e));
    }

    if let Some(gid) = gid {
        if let Err(e) = chown(path, None, Some(gid)) {
            rollback(path, original_uid, original_gid, &e)?;
            error!(
                "Failed to change group of {} to {}: {}",
                path.display(),
                group.unwrap_or_default(),
                e
            );
            return Err(FsError::Io(e));
        }
    }

    info!("Changed owner of {} to {}", path.display(), user);
    Ok(())
}

/// Restore the original owner/group and verify the restore took effect
fn rollback(path: &Path, original_uid: u32, original_gid: u32, cause: &io::Error) -> Result<()> {
    let restored = chown(path, Some(original_uid), Some(original_gid));
    let verified = fs::metadata(path)
        .map(|m| m.uid() == original_uid && m.gid() == original_gid)
        .unwrap_or(false);

    if restored.is_err() || !verified {
        error!(
            "Owner change of {} failed ({}) and the original owner could not be restored",
            path.display(),
            cause
        );
        return Err(FsError::RollbackFailed(format!(
            "owner change of '{}' failed and the original owner {}:{} could not be restored",
            path.display(),
            original_uid,
            original_gid
        )));
    }
    Ok(())
}
