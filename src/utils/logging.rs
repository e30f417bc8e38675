//! Logging utilities
//!
//! Provides logging setup for binaries and tests embedding the crate.

/// Setup logging (env_logger picks up the RUST_LOG environment variable)
pub fn setup_logging() {
    let _ = env_logger::builder().try_init();
}
