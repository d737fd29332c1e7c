//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and layers environment
//! overrides on top.

use crate::paths::CloudTrimPaths;
use cloudtrim_core::config::ClientConfig;
use cloudtrim_core::error::{ApiError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default `config.toml`.
    pub fn new(paths: &CloudTrimPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| ApiError::storage(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading a specific file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the file configuration, loading it on first access.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Ok(guard) = self.config.read()
            && let Some(cached) = guard.as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = self.load_config()?;
        if let Ok(mut guard) = self.config.write() {
            *guard = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// File configuration with process environment overrides applied.
    pub fn resolve(&self) -> Result<ClientConfig> {
        self.get_config()?
            .with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut guard) = self.config.write() {
            *guard = None;
        }
    }

    fn load_config(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            ApiError::storage(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
