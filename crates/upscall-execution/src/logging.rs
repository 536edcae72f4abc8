//! Log subscriber setup.

use tracing_subscriber::EnvFilter;
use upscall_core::{ChatError, Result};

/// Builds the filter: `RUST_LOG` wins, `level` applies otherwise.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| ChatError::config(format!("Invalid log level '{}': {}", level, e)))
}

/// Installs a stderr `fmt` subscriber as the global default.
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = build_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ChatError::internal(format!("Failed to install log subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_is_accepted() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("upscall_core=trace,info").is_ok());
    }
}
