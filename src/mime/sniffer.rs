//! Content-based mime sniffing
//!
//! Inspects a leading sample of the file's bytes rather than trusting the
//! filename. Signature detection failing is not an error; every probe returns
//! an Option.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{FsError, Result};
use crate::mime::table;

/// Bytes inspected per probe
const SAMPLE_SIZE: usize = 8192;

/// Sniffs the MIME type, encoding and extension of one file
///
/// The target path must exist at construction time. The sniffer keeps no
/// state between probes; each call re-reads the leading sample.
#[derive(Debug, Clone)]
pub struct MimeSniffer {
    path: PathBuf,
}

impl MimeSniffer {
    /// Create a sniffer bound to `path`
    ///
    /// Fails with `FsError::NotFound` if the path does not exist.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FsError::NotFound(format!(
                "cannot sniff mime type of '{}' as the file does not exist",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The path this sniffer inspects
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content-sniffed MIME type
    ///
    /// Signature match first; content that is valid UTF-8 without a matching
    /// signature is reported as `text/plain`, empty files as
    /// `application/x-empty`. `None` when the content cannot be classified or
    /// the file cannot be read.
    pub fn kind(&self) -> Option<String> {
        let sample = self.sample()?;
        if sample.is_empty() {
            return Some("application/x-empty".to_string());
        }
        if let Some(info) = infer::get(&sample) {
            return Some(info.mime_type().to_string());
        }
        if std::str::from_utf8(&sample).is_ok() {
            return Some("text/plain".to_string());
        }
        None
    }

    /// Content encoding: `us-ascii`, `utf-8` or `binary`
    ///
    /// `None` only when the file cannot be read.
    pub fn encoding(&self) -> Option<String> {
        let sample = self.sample()?;
        let encoding = if sample.is_empty() {
            "binary"
        } else if sample.is_ascii() {
            "us-ascii"
        } else if std::str::from_utf8(&sample).is_ok() {
            "utf-8"
        } else {
            "binary"
        };
        Some(encoding.to_string())
    }

    /// Extension for the sniffed content, not the filename extension
    ///
    /// The signature's own extension wins; otherwise the sniffed type is
    /// looked up in the built-in table merged with `overrides` (override
    /// entries take precedence). `None` when no mapping exists.
    pub fn extension(&self, overrides: &HashMap<String, String>) -> Option<String> {
        let sample = self.sample()?;
        if let Some(info) = infer::get(&sample) {
            return Some(info.extension().to_string());
        }

        let kind = self.kind()?;
        if let Some(ext) = overrides.get(&kind) {
            return Some(ext.clone());
        }
        table::extension_for(&kind).map(str::to_string)
    }

    fn sample(&self) -> Option<Vec<u8>> {
        let mut file = File::open(&self.path).ok()?;
        let mut sample = vec![0; SAMPLE_SIZE];
        let bytes_read = file.read(&mut sample).ok()?;
        sample.truncate(bytes_read);
        Some(sample)
    }
}
