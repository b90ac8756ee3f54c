//! Shared test helpers: a scriptable cloud connector double.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use osprobe::domain::models::{ApiVersion, Identity, ServiceInfo};
use osprobe::{ClientError, ClientResult, CloudConnector};

/// Connector double whose per-operation outcomes can be scripted and whose
/// calls are recorded in order.
#[derive(Default)]
pub struct FakeCloud {
    pub calls: Mutex<Vec<String>>,
    pub catalog: BTreeMap<String, String>,
    pub fail_basic_with: Option<fn() -> ClientError>,
    pub fail_privileged_with: Option<fn() -> ClientError>,
    pub fail_validate_with: Option<fn() -> ClientError>,
    pub fail_create_with: Option<fn() -> ClientError>,
}

impl FakeCloud {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudConnector for FakeCloud {
    async fn identity_client(&self, identity: &Identity) -> ClientResult<()> {
        self.record(format!("identity:{}", identity.username));
        self.fail_basic_with.map_or(Ok(()), |e| Err(e()))
    }

    async fn privileged_identity_client(&self, identity: &Identity) -> ClientResult<()> {
        self.record(format!("privileged:{}", identity.username));
        self.fail_privileged_with.map_or(Ok(()), |e| Err(e()))
    }

    async fn service_name_map(
        &self,
        identity: &Identity,
    ) -> ClientResult<BTreeMap<String, String>> {
        self.record(format!("services:{}", identity.username));
        Ok(self.catalog.clone())
    }

    async fn resolve_api_version(
        &self,
        _identity: &Identity,
        service: &str,
        info: &ServiceInfo,
    ) -> ClientResult<ApiVersion> {
        self.record(format!("resolve:{service}"));
        Ok(info
            .version
            .clone()
            .unwrap_or_else(|| ApiVersion::Text("1.0".to_string())))
    }

    async fn validate_api_version(
        &self,
        _identity: &Identity,
        service: &str,
        _version: &ApiVersion,
    ) -> ClientResult<()> {
        self.record(format!("validate:{service}"));
        self.fail_validate_with.map_or(Ok(()), |e| Err(e()))
    }

    async fn create_service_client(
        &self,
        _identity: &Identity,
        service: &str,
        _version: &ApiVersion,
        _info: &ServiceInfo,
    ) -> ClientResult<()> {
        self.record(format!("create:{service}"));
        self.fail_create_with.map_or(Ok(()), |e| Err(e()))
    }
}
