//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::ProbeConfig;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Domain default cannot be empty: {0}")]
    EmptyDomainDefault(&'static str),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. osprobe.yaml in the working directory
    /// 3. Environment variables (`OSPROBE_*` prefix, highest priority)
    pub fn load() -> Result<ProbeConfig> {
        let config: ProbeConfig = Figment::new()
            .merge(Serialized::defaults(ProbeConfig::default()))
            .merge(Yaml::file("osprobe.yaml"))
            .merge(Env::prefixed("OSPROBE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<ProbeConfig> {
        let config: ProbeConfig = Figment::new()
            .merge(Serialized::defaults(ProbeConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &ProbeConfig) -> Result<(), ConfigError> {
        if config.domains.user_domain.is_empty() {
            return Err(ConfigError::EmptyDomainDefault("user_domain"));
        }
        if config.domains.project_domain.is_empty() {
            return Err(ConfigError::EmptyDomainDefault("project_domain"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
