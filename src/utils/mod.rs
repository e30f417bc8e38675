//! Utility functions
//!
//! Provides logging setup, advisory file locking, ownership changes and
//! user/group lookups.

pub mod logging;

pub(crate) mod lock;
pub(crate) mod users;

#[cfg(unix)]
pub(crate) mod owner;

/// Whether an error came from a rename across filesystem boundaries
#[cfg(unix)]
pub(crate) fn is_cross_device(error: &std::io::Error) -> bool {
    error.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
pub(crate) fn is_cross_device(_error: &std::io::Error) -> bool {
    false
}
