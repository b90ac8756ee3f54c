//! Input credential specification, as supplied by the deployment config.
//!
//! The shape mirrors what an operator writes in a platform spec file: one
//! shared connection block (`auth_url`, TLS options, profiler options) plus
//! an admin credential and/or a list of user credentials, and optional
//! per-service API overrides.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint interfaces accepted by the spec schema.
pub const ENDPOINT_TYPES: [&str; 3] = ["public", "internal", "admin"];

/// Errors produced by spec validation.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("at least one of 'admin' or 'users' must be specified")]
    NoCredentials,

    #[error("'auth_url' must be a non-empty string")]
    MissingAuthUrl,

    #[error("invalid endpoint_type '{0}': must be one of public, internal, admin")]
    InvalidEndpointType(String),

    #[error("invalid credential for user '{username}': {reason}")]
    InvalidIdentity { username: String, reason: String },

    #[error("invalid api_info entry '{service}': {reason}")]
    InvalidApiInfo { service: String, reason: String },
}

/// A service API version, either numeric (`2`, `2.1`) or string (`"v3"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiVersion {
    Number(serde_json::Number),
    Text(String),
}

impl ApiVersion {
    pub fn int(v: u64) -> Self {
        Self::Number(serde_json::Number::from(v))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Per-service API override: a version, a catalog service type, or both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ApiVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// A single credential as written in the spec, before normalization.
///
/// Two generations are accepted: legacy identities scope by `tenant_name`
/// alone, modern identities scope by `domain_name` or by
/// `project_name` + `project_domain_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawIdentity {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_domain_name: Option<String>,
}

impl RawIdentity {
    /// Minimal legacy-style identity.
    pub fn legacy(
        username: impl Into<String>,
        password: impl Into<String>,
        tenant_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tenant_name: Some(tenant_name.into()),
            project_name: None,
            domain_name: None,
            user_domain_name: None,
            project_domain_name: None,
        }
    }

    fn has_domain_fields(&self) -> bool {
        self.domain_name.is_some()
            || self.user_domain_name.is_some()
            || self.project_domain_name.is_some()
            || self.project_name.is_some()
    }

    /// Enforce the legacy/modern credential shape.
    pub fn validate(&self) -> Result<(), SpecError> {
        let fail = |reason: &str| SpecError::InvalidIdentity {
            username: self.username.clone(),
            reason: reason.to_string(),
        };
        if self.username.is_empty() {
            return Err(fail("'username' must not be empty"));
        }
        if self.has_domain_fields() {
            // Modern scoping: by domain, or by project within a domain.
            if self.tenant_name.is_some() {
                return Err(fail(
                    "'tenant_name' can not be combined with domain scoping; \
                     use 'project_name' instead",
                ));
            }
            if self.domain_name.is_none()
                && !(self.project_name.is_some() && self.project_domain_name.is_some())
            {
                return Err(fail(
                    "either 'domain_name' or 'project_name' with \
                     'project_domain_name' is required",
                ));
            }
        } else if self.tenant_name.is_none() {
            return Err(fail("'tenant_name' is required"));
        }
        Ok(())
    }
}

/// User-supplied platform spec. Field semantics match the deployment
/// configuration consumed by the host orchestration system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CredentialSpec {
    pub auth_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    /// Deprecated and unused; dropped with a warning at normalization time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_insecure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_cacert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiler_hmac_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiler_conn_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<RawIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<RawIdentity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_info: Option<BTreeMap<String, ServiceInfo>>,
}

impl CredentialSpec {
    /// Structural validation of the spec.
    ///
    /// The host system validates specs against its own JSON schema before
    /// handing them over; this is the in-crate equivalent for standalone use.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.auth_url.is_empty() {
            return Err(SpecError::MissingAuthUrl);
        }
        if self.admin.is_none() && self.users.as_ref().is_none_or(Vec::is_empty) {
            return Err(SpecError::NoCredentials);
        }
        if let Some(ref et) = self.endpoint_type {
            if !ENDPOINT_TYPES.contains(&et.as_str()) {
                return Err(SpecError::InvalidEndpointType(et.clone()));
            }
        }
        if let Some(ref admin) = self.admin {
            admin.validate()?;
        }
        for user in self.users.as_deref().unwrap_or_default() {
            user.validate()?;
        }
        if let Some(ref api_info) = self.api_info {
            for (service, info) in api_info {
                if service.is_empty() || !service.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(SpecError::InvalidApiInfo {
                        service: service.clone(),
                        reason: "service name must be a lowercase identifier".to_string(),
                    });
                }
                if info.version.is_none() && info.service_type.is_none() {
                    return Err(SpecError::InvalidApiInfo {
                        service: service.clone(),
                        reason: "at least one of 'version' or 'service_type' is required"
                            .to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
