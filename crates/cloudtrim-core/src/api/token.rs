//! Credential token storage trait.

use std::sync::RwLock;

use crate::error::{ApiError, Result};

/// The fixed key the bearer token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Persists the single bearer token the API client attaches to requests.
///
/// Implementations must never log the token itself.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, `None` when signed out.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Removes the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Process-local token store, used in tests and for demo-mode sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|_| ApiError::storage("token lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::storage("token lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::storage("token lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
