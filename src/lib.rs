//! osprobe — credential normalizer and health checker for
//! OpenStack-compatible clouds.
//!
//! Given a platform spec (or a set of `OS_*` environment variables), this
//! crate normalizes the credentials into one record per identity and
//! verifies that each can open an authenticated session against the cloud's
//! identity service, optionally checking requested per-service API versions.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain** (`domain`): data model and the `CloudConnector` port
//! - **Services** (`services`): normalization, health checking, info
//!   reporting, environment import
//! - **Infrastructure** (`infrastructure`): figment configuration and the
//!   reqwest/Keystone connector
//! - **CLI** (`cli`): command-line driver
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use osprobe::domain::models::{CredentialSpec, DomainDefaults};
//! use osprobe::infrastructure::KeystoneConnector;
//! use osprobe::services::{HealthChecker, SpecNormalizer};
//!
//! # async fn run(spec: CredentialSpec) -> anyhow::Result<()> {
//! let normalizer = SpecNormalizer::new(DomainDefaults::default());
//! let (platform, _) = normalizer.normalize(&spec);
//!
//! let checker = HealthChecker::new(Arc::new(KeystoneConnector::new()));
//! let report = checker.check(&platform).await;
//! assert!(report.available);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ApiVersion, CleanupReport, CredentialSpec, DomainDefaults, EnvDiscovery, HealthReport,
    Identity, PlatformData, PlatformInfo, ProbeConfig, RawIdentity, ServiceEntry, ServiceInfo,
    SpecError, TlsClientCert,
};
pub use domain::ports::{ClientError, ClientResult, CloudConnector, UNKNOWN_SERVICE_NAME};
pub use infrastructure::{ConfigError, ConfigLoader, KeystoneConnector};
pub use services::{spec_from_env, HealthChecker, InfoReporter, SpecNormalizer};
