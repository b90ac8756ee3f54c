//! Spec normalization: user-written credential specs into platform data.

use tracing::warn;

use crate::domain::models::{
    CredentialSpec, DomainDefaults, Identity, PlatformData, PlatformMetadata, RawIdentity,
    TlsClientCert,
};

/// Connection fields shared by every identity of one spec.
struct SharedFields {
    auth_url: String,
    region_name: Option<String>,
    endpoint_type: Option<String>,
    https_insecure: Option<bool>,
    https_cacert: Option<String>,
    https_cert: Option<TlsClientCert>,
    profiler_hmac_key: Option<String>,
    profiler_conn_str: Option<String>,
}

impl SharedFields {
    fn from_spec(spec: &CredentialSpec) -> Self {
        // A cert with its key collapses into one pair value; the key never
        // survives as a separate field.
        let https_cert = match (&spec.https_cert, &spec.https_key) {
            (Some(cert), Some(key)) if !cert.is_empty() && !key.is_empty() => {
                Some(TlsClientCert::CertAndKey(cert.clone(), key.clone()))
            }
            (Some(cert), _) if !cert.is_empty() => Some(TlsClientCert::CertOnly(cert.clone())),
            _ => None,
        };
        Self {
            auth_url: spec.auth_url.clone(),
            region_name: spec.region_name.clone(),
            endpoint_type: spec.endpoint_type.clone(),
            https_insecure: spec.https_insecure,
            https_cacert: spec.https_cacert.clone(),
            https_cert,
            profiler_hmac_key: spec.profiler_hmac_key.clone(),
            profiler_conn_str: spec.profiler_conn_str.clone(),
        }
    }
}

/// Converts credential specs into the internal platform presentation.
///
/// The normalizer validates nothing itself; specs are assumed structurally
/// valid (see [`CredentialSpec::validate`]). It never fails.
#[derive(Debug, Clone, Default)]
pub struct SpecNormalizer {
    defaults: DomainDefaults,
}

impl SpecNormalizer {
    pub fn new(defaults: DomainDefaults) -> Self {
        Self { defaults }
    }

    /// Produce the normalized credential set plus auxiliary metadata
    /// (currently always empty).
    pub fn normalize(&self, spec: &CredentialSpec) -> (PlatformData, PlatformMetadata) {
        if spec.endpoint.is_some() {
            warn!("endpoint is deprecated and not used.");
        }

        let shared = SharedFields::from_spec(spec);
        let admin = spec.admin.as_ref().map(|raw| self.merge(raw, &shared));
        let users = spec
            .users
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|raw| self.merge(raw, &shared))
            .collect();

        let data = PlatformData {
            admin,
            users,
            api_info: spec.api_info.clone(),
        };
        (data, PlatformMetadata::new())
    }

    /// Merge one raw identity with the shared fields and fill defaults for
    /// anything still unset. `project_name` unifies into `tenant_name`.
    fn merge(&self, raw: &RawIdentity, shared: &SharedFields) -> Identity {
        Identity {
            auth_url: shared.auth_url.clone(),
            username: raw.username.clone(),
            password: raw.password.clone(),
            tenant_name: raw.project_name.clone().or_else(|| raw.tenant_name.clone()),
            domain_name: raw.domain_name.clone(),
            user_domain_name: raw
                .user_domain_name
                .clone()
                .or_else(|| Some(self.defaults.user_domain.clone())),
            project_domain_name: raw
                .project_domain_name
                .clone()
                .or_else(|| Some(self.defaults.project_domain.clone())),
            region_name: shared.region_name.clone(),
            endpoint_type: shared.endpoint_type.clone(),
            https_insecure: shared.https_insecure.unwrap_or(false),
            https_cacert: shared.https_cacert.clone(),
            https_cert: shared.https_cert.clone(),
            profiler_hmac_key: shared.profiler_hmac_key.clone(),
            profiler_conn_str: shared.profiler_conn_str.clone(),
        }
    }
}
