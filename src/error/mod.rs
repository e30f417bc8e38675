//! Error handling
//!
//! Defines the error taxonomy surfaced by file, folder and path operations.

pub mod types;

pub use types::*;
