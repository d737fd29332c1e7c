pub mod auth;
pub mod dashboard;
pub mod optimize;

use anyhow::{Context, Result, anyhow};
use cloudtrim_core::error::ApiError;
use std::io::Write;

/// Turns a use case failure into the CLI's top-level error.
pub(crate) fn failure(what: &str, err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Cancelled => anyhow!("{what} cancelled"),
        other => anyhow!("{what} failed: {}", other.user_message()),
    }
}

/// Prints a rendered view to stdout.
pub(crate) fn emit(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write to stdout")
}
