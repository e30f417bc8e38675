//! Configuration for filesystem handles
//!
//! Loads the root path that sanitized paths are confined to, plus the default
//! directory creation mode. The root is handed to [`PathSanitizer`] explicitly
//! rather than stored in process-wide state, so the "must be established
//! before use" contract is enforced by construction.
//!
//! [`PathSanitizer`]: crate::path::PathSanitizer

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{FsError, Result};
use crate::path::PathSanitizer;

/// Default mode applied when creating directories
pub const DEFAULT_FOLDER_MODE: u32 = 0o775;

/// Filesystem layer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FsConfig {
    /// Absolute directory all sanitized paths are joined under
    pub root: String,

    /// Mode applied when creating directories (default 0o775)
    pub folder_mode: Option<u32>,
}

impl FsConfig {
    /// Load configuration from filesystem.toml with environment overrides
    ///
    /// The file source is optional; `FSH_ROOT` and `FSH_FOLDER_MODE`
    /// environment variables take precedence over file values.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("filesystem").required(false))
            .add_source(Environment::with_prefix("FSH"))
            .build()
            .map_err(|e| FsError::Configuration(e.to_string()))?;

        let config: FsConfig = settings
            .try_deserialize()
            .map_err(|e| FsError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config directly from a known root path
    pub fn with_root<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config = FsConfig {
            root: root.as_ref().to_string_lossy().into_owned(),
            folder_mode: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// A sanitizer confined to this configuration's root
    pub fn sanitizer(&self) -> Result<PathSanitizer> {
        PathSanitizer::new(&self.root)
    }

    /// Get the root as a PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    /// Mode used when creating directories
    pub fn dir_mode(&self) -> u32 {
        self.folder_mode.unwrap_or(DEFAULT_FOLDER_MODE)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<()> {
        if self.root.trim().is_empty() {
            return Err(FsError::Configuration(
                "root path cannot be empty".into(),
            ));
        }

        if !Path::new(&self.root).is_absolute() {
            return Err(FsError::Configuration(format!(
                "root path '{}' must be absolute",
                self.root
            )));
        }

        if let Some(mode) = self.folder_mode {
            if mode > 0o777 {
                return Err(FsError::Configuration(format!(
                    "folder_mode {:o} is out of range",
                    mode
                )));
            }
        }

        Ok(())
    }
}
