//! Result records returned by platform operations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::spec::CredentialSpec;

/// Outcome of a platform health check. Produced fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl HealthReport {
    pub fn healthy() -> Self {
        Self {
            available: true,
            message: None,
            traceback: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: Some(message.into()),
            traceback: None,
        }
    }

    pub fn unavailable_with_trace(
        message: impl Into<String>,
        traceback: impl Into<String>,
    ) -> Self {
        Self {
            available: false,
            message: Some(message.into()),
            traceback: Some(traceback.into()),
        }
    }
}

/// One service catalog entry in a platform info report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Platform description returned by the info reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub info: PlatformInfoBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfoBody {
    pub services: Vec<ServiceEntry>,
}

/// Resource cleanup summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub message: String,
    pub discovered: u64,
    pub deleted: u64,
    pub failed: u64,
    pub resources: BTreeMap<String, serde_json::Value>,
    pub errors: Vec<String>,
}

impl CleanupReport {
    /// Cleanup of externally-owned clouds is not implemented; the report is
    /// a fixed placeholder.
    pub fn not_implemented() -> Self {
        Self {
            message: "Coming soon!".to_string(),
            discovered: 0,
            deleted: 0,
            failed: 0,
            resources: BTreeMap::new(),
            errors: Vec::new(),
        }
    }
}

/// Result of building a spec from environment variables.
///
/// Never an error: missing or inconsistent variables are reported through
/// `available: false` and a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvDiscovery {
    pub available: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<CredentialSpec>,
}

impl EnvDiscovery {
    pub fn found(spec: CredentialSpec) -> Self {
        Self {
            available: true,
            message: "Available".to_string(),
            spec: Some(spec),
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
            spec: None,
        }
    }
}
