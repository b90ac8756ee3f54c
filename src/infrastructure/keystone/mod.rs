//! Keystone-backed implementation of the [`CloudConnector`] port.
//!
//! Speaks password authentication against Keystone v2 and v3 over HTTP.
//! Stateless: every operation authenticates from scratch, so concurrent
//! callers never share session state.

pub mod protocol;

use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::models::{ApiVersion, Identity, ServiceInfo, TlsClientCert};
use crate::domain::ports::{ClientError, ClientResult, CloudConnector};

use protocol::TokenInfo;

/// Reqwest-based Keystone connector.
#[derive(Debug, Clone, Default)]
pub struct KeystoneConnector;

impl KeystoneConnector {
    pub fn new() -> Self {
        Self
    }

    /// Build an HTTP client honoring the identity's TLS options.
    fn http_client(identity: &Identity) -> ClientResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if identity.https_insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(cacert) = identity.https_cacert.as_deref().filter(|c| !c.is_empty()) {
            let pem = std::fs::read(cacert)
                .with_context(|| format!("failed to read CA certificate '{cacert}'"))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .with_context(|| format!("invalid CA certificate '{cacert}'"))?;
            builder = builder.add_root_certificate(cert);
        }
        if let Some(ref cert) = identity.https_cert {
            builder = builder.identity(Self::client_identity(cert)?);
        }
        builder.build().map_err(ClientError::unexpected)
    }

    /// Load client TLS material, concatenating cert and key PEM when paired.
    fn client_identity(cert: &TlsClientCert) -> ClientResult<reqwest::Identity> {
        let path = cert.cert_path();
        let mut pem = std::fs::read(path)
            .with_context(|| format!("failed to read client certificate '{path}'"))?;
        if let Some(key_path) = cert.key_path() {
            let key = std::fs::read(key_path)
                .with_context(|| format!("failed to read client key '{key_path}'"))?;
            pem.extend_from_slice(b"\n");
            pem.extend_from_slice(&key);
        }
        reqwest::Identity::from_pem(&pem)
            .with_context(|| format!("invalid client certificate '{path}'"))
            .map_err(ClientError::unexpected)
    }

    fn classify_status(identity: &Identity, status: StatusCode, body: &str) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::known(format!(
                "Failed to authenticate user '{}': the identity service rejected \
                 the credentials.",
                identity.username
            )),
            StatusCode::NOT_FOUND => ClientError::known(format!(
                "No identity endpoint found at '{}'.",
                identity.auth_url
            )),
            _ => ClientError::unexpected(anyhow!(
                "identity service returned HTTP {status}: {body}"
            )),
        }
    }

    /// Authenticate and return the parsed token.
    async fn issue_token(&self, identity: &Identity) -> ClientResult<TokenInfo> {
        let client = Self::http_client(identity)?;
        let url = protocol::token_url(identity);
        let v2 = protocol::is_v2(identity);
        let payload = if v2 {
            protocol::v2_auth_payload(identity)
        } else {
            protocol::v3_auth_payload(identity)
        };
        debug!(url = %url, username = %identity.username, "requesting identity token");

        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("token request to '{url}' failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(identity, status, &body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("identity service returned a malformed token document")?;
        Ok(if v2 {
            protocol::parse_v2_token(&body)
        } else {
            protocol::parse_v3_token(&body)
        })
    }
}

#[async_trait]
impl CloudConnector for KeystoneConnector {
    async fn identity_client(&self, identity: &Identity) -> ClientResult<()> {
        self.issue_token(identity).await.map(|_| ())
    }

    async fn privileged_identity_client(&self, identity: &Identity) -> ClientResult<()> {
        let token = self.issue_token(identity).await?;
        if token.has_role("admin") {
            Ok(())
        } else {
            Err(ClientError::known(format!(
                "User '{}' does not have the admin role in the requested scope.",
                identity.username
            )))
        }
    }

    async fn service_name_map(
        &self,
        identity: &Identity,
    ) -> ClientResult<BTreeMap<String, String>> {
        let token = self.issue_token(identity).await?;
        Ok(token.catalog.into_iter().collect())
    }

    async fn resolve_api_version(
        &self,
        _identity: &Identity,
        service: &str,
        info: &ServiceInfo,
    ) -> ClientResult<ApiVersion> {
        if let Some(ref version) = info.version {
            return Ok(version.clone());
        }
        protocol::default_version(service).ok_or_else(|| {
            ClientError::known(format!("There is no known client for '{service}'."))
        })
    }

    async fn validate_api_version(
        &self,
        _identity: &Identity,
        service: &str,
        version: &ApiVersion,
    ) -> ClientResult<()> {
        let supported = protocol::supported_versions(service).ok_or_else(|| {
            ClientError::known(format!("There is no known client for '{service}'."))
        })?;
        let requested = version.to_string();
        if supported.contains(&requested.as_str()) {
            Ok(())
        } else {
            Err(ClientError::known(format!(
                "Version {requested} of {service} is not supported."
            )))
        }
    }

    async fn create_service_client(
        &self,
        identity: &Identity,
        service: &str,
        version: &ApiVersion,
        info: &ServiceInfo,
    ) -> ClientResult<()> {
        let service_type = match info.service_type {
            Some(ref st) => st.clone(),
            None => protocol::default_service_type(service, version).ok_or_else(|| {
                ClientError::known(format!("There is no known client for '{service}'."))
            })?,
        };
        // Identity itself is reachable whenever a token was issued; for
        // anything else the catalog must advertise the service type.
        if service == "keystone" {
            self.issue_token(identity).await.map(|_| ())
        } else {
            let token = self.issue_token(identity).await?;
            if token.catalog.iter().any(|(st, _)| *st == service_type) {
                Ok(())
            } else {
                Err(ClientError::unexpected(anyhow!(
                    "service type '{service_type}' is not registered in the catalog"
                )))
            }
        }
    }
}
