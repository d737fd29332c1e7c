//! Client configuration model.
//!
//! Loaded from `config.toml` by `cloudtrim-infrastructure`; environment
//! variables and CLI flags are layered on top.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

pub const ENV_API_URL: &str = "CLOUDTRIM_API_URL";
pub const ENV_FALLBACK: &str = "CLOUDTRIM_FALLBACK";
pub const ENV_AUTH_MODE: &str = "CLOUDTRIM_AUTH_MODE";

/// Which fallback provider the dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Substitute the built-in demo rows on failure.
    #[default]
    Demo,
    /// Show only the error.
    None,
}

impl FromStr for FallbackMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "none" | "off" => Ok(Self::None),
            other => Err(ApiError::invalid_input(format!(
                "unknown fallback mode '{other}' (expected demo or none)"
            ))),
        }
    }
}

/// How login and signup are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Call the backend's auth endpoints.
    #[default]
    Remote,
    /// Accept any credentials locally as the demo user.
    Demo,
}

impl FromStr for AuthMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "demo" => Ok(Self::Demo),
            other => Err(ApiError::invalid_input(format!(
                "unknown auth mode '{other}' (expected remote or demo)"
            ))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Root configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub fallback: FallbackMode,
    pub auth_mode: AuthMode,
    /// No timeout is applied when absent.
    pub request_timeout_secs: Option<u64>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fallback: FallbackMode::default(),
            auth_mode: AuthMode::default(),
            request_timeout_secs: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Layers environment overrides on top of this config.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production and a map in tests.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(mode) = lookup(ENV_FALLBACK) {
            self.fallback = mode.parse()?;
        }
        if let Some(mode) = lookup(ENV_AUTH_MODE) {
            self.auth_mode = mode.parse()?;
        }
        Ok(self)
    }
}
