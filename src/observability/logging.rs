//! # Logging
//!
//! Tracing subscriber setup. `RUST_LOG` takes precedence; otherwise the
//! configured level applies to this crate only.

use crate::config::InitSecretsConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set, e.g. `init_secrets=info`
#[must_use]
pub fn default_directive(log_level: &str) -> String {
    format!("init_secrets={}", log_level.to_lowercase())
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a subscriber is already installed.
pub fn init_tracing(config: &InitSecretsConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(&config.log_level))
            .map_err(|e| anyhow!("Invalid LOG_LEVEL '{}': {e}", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_ansi(config.log_enable_color).try_init()
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_lowercases_level() {
        assert_eq!(default_directive("INFO"), "init_secrets=info");
        assert_eq!(default_directive("debug"), "init_secrets=debug");
    }

    #[test]
    fn test_default_directive_parses() {
        for level in ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"] {
            EnvFilter::try_new(default_directive(level)).unwrap();
        }
    }
}
