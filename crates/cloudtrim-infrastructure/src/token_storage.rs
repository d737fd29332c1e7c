//! File-backed credential token storage.
//!
//! The token lives in `credentials.json` under the fixed key `token`; this is
//! the only client state that survives a restart.

use crate::paths::CloudTrimPaths;
use cloudtrim_core::api::{TOKEN_KEY, TokenStore};
use cloudtrim_core::error::{ApiError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Errors that can occur during token storage operations.
#[derive(Debug)]
pub enum TokenStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// The file parsed but is not a JSON object.
    InvalidFormat(PathBuf),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for TokenStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            TokenStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            TokenStorageError::InvalidFormat(path) => {
                write!(f, "Credentials file is not a JSON object: {}", path.display())
            }
            TokenStorageError::ConfigDirNotFound => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for TokenStorageError {}

impl From<std::io::Error> for TokenStorageError {
    fn from(e: std::io::Error) -> Self {
        TokenStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for TokenStorageError {
    fn from(e: serde_json::Error) -> Self {
        TokenStorageError::ParseError(e)
    }
}

impl From<TokenStorageError> for ApiError {
    fn from(e: TokenStorageError) -> Self {
        ApiError::storage(e.to_string())
    }
}

/// Stores the bearer token in `credentials.json`.
///
/// Responsibilities:
/// - Read and write the `token` key, preserving any other keys in the file
/// - Create the parent directory on first save
/// - Restrict the file to the current user on Unix
///
/// Does NOT:
/// - Validate, refresh, or rotate the token
/// - Encrypt the file (plaintext JSON storage)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default credentials path.
    pub fn new(paths: &CloudTrimPaths) -> std::result::Result<Self, TokenStorageError> {
        let path = paths
            .credentials_file()
            .map_err(|_| TokenStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_document(&self) -> std::result::Result<Map<String, Value>, TokenStorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(TokenStorageError::InvalidFormat(self.path.clone())),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> std::result::Result<(), TokenStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;

        // Set file permissions to 600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let document = self.read_document()?;
        Ok(document
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_document(&document)?;
        tracing::debug!("[FileTokenStore] Token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut document = self.read_document()?;
        if document.remove(TOKEN_KEY).is_some() {
            self.write_document(&document)?;
            tracing::debug!("[FileTokenStore] Token cleared");
        }
        Ok(())
    }
}
