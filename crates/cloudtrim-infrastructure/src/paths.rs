//! Unified path management for CloudTrim client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cloudtrim/          # Config directory
//! ├── config.toml               # Client configuration
//! └── credentials.json          # Bearer token ({"token": "..."})
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "cloudtrim";
const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither a base path was given nor a platform config directory found.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file the client reads or writes.
///
/// With a base path all files live directly under it (tests);
/// otherwise under the platform config directory.
#[derive(Debug, Clone, Default)]
pub struct CloudTrimPaths {
    base: Option<PathBuf>,
}

impl CloudTrimPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the CloudTrim configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the path to the credentials file.
    ///
    /// # Security Note
    ///
    /// The token store writes this file with mode 600 on Unix.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CREDENTIALS_FILE))
    }
}
