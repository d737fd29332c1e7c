//! tracing-subscriber setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_level`; an unparsable level falls back to
/// `warn`.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
