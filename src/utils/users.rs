//! User and group lookups
//!
//! Resolves user and group names to numeric ids for ownership changes.

#[cfg(unix)]
use std::ffi::CString;

/// Resolve a user name to its uid, None if the user is unknown
#[cfg(unix)]
pub(crate) fn uid_for(name: &str) -> Option<u32> {
    let cname = CString::new(name).ok()?;
    let passwd = unsafe { libc::getpwnam(cname.as_ptr()) };
    if passwd.is_null() {
        None
    } else {
        Some(unsafe { (*passwd).pw_uid })
    }
}

/// Resolve a group name to its gid, None if the group is unknown
#[cfg(unix)]
pub(crate) fn gid_for(name: &str) -> Option<u32> {
    let cname = CString::new(name).ok()?;
    let group = unsafe { libc::getgrnam(cname.as_ptr()) };
    if group.is_null() {
        None
    } else {
        Some(unsafe { (*group).gr_gid })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_root_user() {
        assert_eq!(uid_for("root"), Some(0));
    }

    #[test]
    fn test_unknown_user_is_none() {
        assert_eq!(uid_for("no-such-user-zz"), None);
    }

    #[test]
    fn test_name_with_nul_is_none() {
        assert_eq!(uid_for("bad\0name"), None);
    }
}
