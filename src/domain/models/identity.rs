//! Normalized credential records.

use serde::{Deserialize, Serialize};

/// Placeholder substituted for passwords in any rendered identity.
pub const PASSWORD_MASK: &str = "***";

/// Client TLS material attached to an identity.
///
/// A certificate may come alone or paired with its private key; once paired
/// there is no separate key field on the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TlsClientCert {
    CertOnly(String),
    CertAndKey(String, String),
}

impl TlsClientCert {
    pub fn cert_path(&self) -> &str {
        match self {
            Self::CertOnly(cert) | Self::CertAndKey(cert, _) => cert,
        }
    }

    pub fn key_path(&self) -> Option<&str> {
        match self {
            Self::CertOnly(_) => None,
            Self::CertAndKey(_, key) => Some(key),
        }
    }
}

/// A fully normalized credential: per-user login fields merged with the
/// connection fields shared by the whole platform spec, with defaults filled
/// in. One `Identity` is everything needed to open one authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub tenant_name: Option<String>,
    pub domain_name: Option<String>,
    pub user_domain_name: Option<String>,
    pub project_domain_name: Option<String>,
    pub region_name: Option<String>,
    pub endpoint_type: Option<String>,
    pub https_insecure: bool,
    pub https_cacert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_cert: Option<TlsClientCert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiler_hmac_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiler_conn_str: Option<String>,
}

impl Identity {
    /// Render the identity as pretty-printed JSON with the password masked.
    ///
    /// Keys are sorted and indented with two spaces, suitable for inclusion
    /// in user-facing diagnostics.
    pub fn redacted_json(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "password".to_string(),
                serde_json::Value::String(PASSWORD_MASK.to_string()),
            );
        }
        // serde_json maps are ordered by key, matching sort_keys output.
        serde_json::to_string_pretty(&value).unwrap_or_default()
    }
}
