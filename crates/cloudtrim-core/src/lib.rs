//! Domain layer for the CloudTrim client.
//!
//! Models, the shared error type, the seams other crates implement
//! (`CloudTrimApi`, `TokenStore`, `FallbackProvider`) and the client state
//! store.

pub mod api;
pub mod auth;
pub mod config;
pub mod cost;
pub mod error;
pub mod fallback;
pub mod format;
pub mod recommendation;
pub mod resource;
pub mod store;

// Re-export common error type
pub use error::ApiError;
