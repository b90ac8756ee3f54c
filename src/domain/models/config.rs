//! Process-wide configuration.

use serde::{Deserialize, Serialize};

/// Main configuration structure for osprobe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProbeConfig {
    /// Domain-name defaults applied during credential normalization.
    #[serde(default)]
    pub domains: DomainDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults used for identities that do not carry explicit domain scoping.
///
/// An explicit struct rather than ambient global state, so concurrent
/// callers can normalize against different defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DomainDefaults {
    #[serde(default = "default_domain")]
    pub user_domain: String,
    #[serde(default = "default_domain")]
    pub project_domain: String,
}

fn default_domain() -> String {
    "default".to_string()
}

impl Default for DomainDefaults {
    fn default() -> Self {
        Self {
            user_domain: default_domain(),
            project_domain: default_domain(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json or pretty).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
