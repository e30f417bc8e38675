//! Mime sniffing
//!
//! Content-based (not filename-based) detection of a file's type, encoding
//! and extension, with a static fallback table.

pub mod sniffer;
pub mod table;

pub use sniffer::MimeSniffer;
