pub mod config;
pub mod identity;
pub mod platform;
pub mod report;
pub mod spec;

pub use config::{DomainDefaults, LoggingConfig, ProbeConfig};
pub use identity::{Identity, TlsClientCert, PASSWORD_MASK};
pub use platform::{PlatformData, PlatformMetadata};
pub use report::{
    CleanupReport, EnvDiscovery, HealthReport, PlatformInfo, PlatformInfoBody, ServiceEntry,
};
pub use spec::{ApiVersion, CredentialSpec, RawIdentity, ServiceInfo, SpecError};
