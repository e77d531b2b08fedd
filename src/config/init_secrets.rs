//! # Init Secrets Configuration
//!
//! Settings loaded from environment variables.

use crate::constants::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_NAMESPACE, ENV_NAMESPACE, ENV_POD_NAMESPACE,
};
use crate::controller::reconciler::FailurePolicy;

/// Process-level configuration
///
/// All settings have defaults and can be overridden via environment variables;
/// command-line flags take precedence over both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSecretsConfig {
    /// Namespace the Secrets live in (`NAMESPACE`, then `POD_NAMESPACE`)
    pub namespace: String,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE), used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Keep processing declarations after one fails
    pub continue_on_error: bool,
}

impl Default for InitSecretsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            log_enable_color: false,
            continue_on_error: false,
        }
    }
}

impl InitSecretsConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            namespace: non_empty(ENV_NAMESPACE)
                .or_else(|| non_empty(ENV_POD_NAMESPACE))
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: non_empty("LOG_FORMAT").unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
            log_enable_color: non_empty("LOG_ENABLE_COLOR").is_some_and(|v| parse_bool(&v)),
            continue_on_error: non_empty("CONTINUE_ON_ERROR").is_some_and(|v| parse_bool(&v)),
        }
    }

    /// Failure policy implied by `continue_on_error`
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Halt
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
