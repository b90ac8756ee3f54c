//! Infrastructure layer: adapters for external integrations.
//!
//! - Configuration management (figment)
//! - Keystone HTTP connector implementing the `CloudConnector` port

pub mod config;
pub mod keystone;

pub use config::{ConfigError, ConfigLoader};
pub use keystone::KeystoneConnector;
