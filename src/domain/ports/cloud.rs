//! Cloud connectivity port.
//!
//! The health checker and info reporter talk to the target cloud exclusively
//! through this trait, so any network client can back it and tests can
//! substitute a double.

use std::backtrace::Backtrace;
use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::models::{ApiVersion, Identity, ServiceInfo};

/// Catalog display name reported for services whose name is not known.
pub const UNKNOWN_SERVICE_NAME: &str = "__unknown__";

/// Failure raised by a cloud connector.
///
/// Two explicit tiers instead of exception-class sniffing: `Known` failures
/// carry an end-user-safe message and are surfaced verbatim; everything else
/// is `Unexpected` and gets redacted, generic reporting.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Known { message: String },

    #[error("{source}")]
    Unexpected {
        #[from]
        source: anyhow::Error,
    },
}

impl ClientError {
    pub fn known(message: impl Into<String>) -> Self {
        Self::Known {
            message: message.into(),
        }
    }

    pub fn unexpected(source: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected {
            source: source.into(),
        }
    }

    /// Render a diagnostic trace: the error chain followed by a captured
    /// backtrace of the failure site.
    pub fn render_trace(&self) -> String {
        let chain = match self {
            Self::Known { message } => message.clone(),
            Self::Unexpected { source } => format!("{source:#}"),
        };
        format!("{chain}\nBacktrace:\n{}", Backtrace::force_capture())
    }
}

/// Result alias for connector operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// One authenticated view of a cloud, keyed by a normalized [`Identity`].
///
/// Implementations open real network sessions; the health checker treats
/// this as its sole point of network interaction. All calls are sequential
/// and idempotent; timeouts are the implementation's concern.
#[async_trait]
pub trait CloudConnector: Send + Sync {
    /// Resolve an identity token without elevated scope.
    async fn identity_client(&self, identity: &Identity) -> ClientResult<()>;

    /// Resolve an identity token and confirm administrative privilege.
    async fn privileged_identity_client(&self, identity: &Identity) -> ClientResult<()>;

    /// Enumerate the service catalog as `service_type -> display_name`;
    /// nameless services map to [`UNKNOWN_SERVICE_NAME`].
    async fn service_name_map(&self, identity: &Identity)
        -> ClientResult<BTreeMap<String, String>>;

    /// Resolve the API version to use for `service`, honoring the requested
    /// override in `info`.
    async fn resolve_api_version(
        &self,
        identity: &Identity,
        service: &str,
        info: &ServiceInfo,
    ) -> ClientResult<ApiVersion>;

    /// Check that `version` is supported for `service`.
    async fn validate_api_version(
        &self,
        identity: &Identity,
        service: &str,
        version: &ApiVersion,
    ) -> ClientResult<()>;

    /// Instantiate a client for `service` at `version`.
    async fn create_service_client(
        &self,
        identity: &Identity,
        service: &str,
        version: &ApiVersion,
        info: &ServiceInfo,
    ) -> ClientResult<()>;
}
