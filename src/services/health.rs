//! Platform health checking.
//!
//! Opens one authenticated session per identity, admin last with elevated
//! verification, and stops at the first failure.

use std::sync::Arc;

use tracing::debug;

use crate::domain::models::{ApiVersion, HealthReport, Identity, PlatformData, ServiceInfo};
use crate::domain::ports::{ClientError, CloudConnector};

/// Role an identity plays during the check, decided by its position in the
/// check list rather than by object identity, so it survives copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    User,
    Admin,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Failure inside the per-service api_info checks.
enum ApiCheckFailure {
    /// A friendly error while resolving or validating the version; reported
    /// without a traceback.
    Setting(String),
    /// Anything unexpected; reported with the version we were after.
    Create { version: String, trace: String },
}

/// Verifies that every credential of a platform can open an authenticated
/// session, and that requested service API versions are usable.
pub struct HealthChecker<C: CloudConnector> {
    connector: Arc<C>,
}

impl<C: CloudConnector> HealthChecker<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Run the full health check. Fail-fast: the first unhealthy identity or
    /// service short-circuits the rest.
    pub async fn check(&self, data: &PlatformData) -> HealthReport {
        let mut checks: Vec<(Role, &Identity)> =
            data.users.iter().map(|u| (Role::User, u)).collect();
        if let Some(ref admin) = data.admin {
            checks.push((Role::Admin, admin));
        }

        // api_info checks attach to the primary identity, once: the admin
        // when present, otherwise the first user.
        let primary_index = if data.admin.is_some() {
            checks.len().saturating_sub(1)
        } else {
            0
        };

        for (index, (role, identity)) in checks.into_iter().enumerate() {
            let result = match role {
                Role::Admin => self.connector.privileged_identity_client(identity).await,
                Role::User => self.connector.identity_client(identity).await,
            };

            match result {
                Ok(()) => {}
                Err(err @ ClientError::Known { .. }) => {
                    return HealthReport::unavailable_with_trace(
                        err.to_string(),
                        err.render_trace(),
                    );
                }
                Err(err) => {
                    debug!(
                        error = %err,
                        username = %identity.username,
                        "something unexpected had happened while validating credentials"
                    );
                    return HealthReport::unavailable_with_trace(
                        format!(
                            "Bad {} creds: \n{}",
                            role.as_str(),
                            identity.redacted_json()
                        ),
                        err.render_trace(),
                    );
                }
            }

            if index == primary_index {
                if let Some(ref api_info) = data.api_info {
                    for (service, info) in api_info {
                        match self.check_service(identity, service, info).await {
                            Ok(()) => {}
                            Err(ApiCheckFailure::Setting(message)) => {
                                return HealthReport::unavailable(format!(
                                    "Invalid setting for '{service}': {message}"
                                ));
                            }
                            Err(ApiCheckFailure::Create { version, trace }) => {
                                return HealthReport::unavailable_with_trace(
                                    format!(
                                        "Can not create '{service}' with {version} version."
                                    ),
                                    trace,
                                );
                            }
                        }
                    }
                }
            }
        }

        HealthReport::healthy()
    }

    /// Resolve, validate, and instantiate one service client.
    async fn check_service(
        &self,
        identity: &Identity,
        service: &str,
        info: &ServiceInfo,
    ) -> Result<(), ApiCheckFailure> {
        let requested = info.version.as_ref().map_or_else(
            || "default".to_string(),
            ApiVersion::to_string,
        );

        let version = self
            .connector
            .resolve_api_version(identity, service, info)
            .await
            .map_err(|err| Self::service_failure(&err, &requested))?;

        self.connector
            .validate_api_version(identity, service, &version)
            .await
            .map_err(|err| Self::service_failure(&err, &version.to_string()))?;

        self.connector
            .create_service_client(identity, service, &version, info)
            .await
            .map_err(|err| Self::service_failure(&err, &version.to_string()))
    }

    fn service_failure(err: &ClientError, version: &str) -> ApiCheckFailure {
        match err {
            ClientError::Known { message } => ApiCheckFailure::Setting(message.clone()),
            ClientError::Unexpected { .. } => ApiCheckFailure::Create {
                version: version.to_string(),
                trace: err.render_trace(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::ports::ClientResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scriptable connector double that records every call.
    #[derive(Default)]
    struct ScriptedConnector {
        calls: Mutex<Vec<String>>,
        basic_error: Option<fn() -> ClientError>,
        privileged_error: Option<fn() -> ClientError>,
        resolve_error: Option<fn() -> ClientError>,
        validate_error: Option<fn() -> ClientError>,
        create_error: Option<fn() -> ClientError>,
    }

    impl ScriptedConnector {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CloudConnector for ScriptedConnector {
        async fn identity_client(&self, identity: &Identity) -> ClientResult<()> {
            self.record(format!("identity:{}", identity.username));
            self.basic_error.map_or(Ok(()), |e| Err(e()))
        }

        async fn privileged_identity_client(&self, identity: &Identity) -> ClientResult<()> {
            self.record(format!("privileged:{}", identity.username));
            self.privileged_error.map_or(Ok(()), |e| Err(e()))
        }

        async fn service_name_map(
            &self,
            _identity: &Identity,
        ) -> ClientResult<BTreeMap<String, String>> {
            Ok(BTreeMap::new())
        }

        async fn resolve_api_version(
            &self,
            _identity: &Identity,
            service: &str,
            info: &ServiceInfo,
        ) -> ClientResult<ApiVersion> {
            self.record(format!("resolve:{service}"));
            match self.resolve_error {
                Some(e) => Err(e()),
                None => Ok(info
                    .version
                    .clone()
                    .unwrap_or_else(|| ApiVersion::Text("1.0".to_string()))),
            }
        }

        async fn validate_api_version(
            &self,
            _identity: &Identity,
            service: &str,
            _version: &ApiVersion,
        ) -> ClientResult<()> {
            self.record(format!("validate:{service}"));
            self.validate_error.map_or(Ok(()), |e| Err(e()))
        }

        async fn create_service_client(
            &self,
            _identity: &Identity,
            service: &str,
            _version: &ApiVersion,
            _info: &ServiceInfo,
        ) -> ClientResult<()> {
            self.record(format!("create:{service}"));
            self.create_error.map_or(Ok(()), |e| Err(e()))
        }
    }

    fn identity(name: &str) -> Identity {
        Identity {
            auth_url: "https://keystone.test".to_string(),
            username: name.to_string(),
            password: "12345".to_string(),
            tenant_name: Some("demo".to_string()),
            domain_name: None,
            user_domain_name: Some("default".to_string()),
            project_domain_name: Some("default".to_string()),
            region_name: None,
            endpoint_type: None,
            https_insecure: false,
            https_cacert: None,
            https_cert: None,
            profiler_hmac_key: None,
            profiler_conn_str: None,
        }
    }

    fn platform(admin: Option<&str>, users: &[&str]) -> PlatformData {
        PlatformData {
            admin: admin.map(identity),
            users: users.iter().map(|u| identity(u)).collect(),
            api_info: None,
        }
    }

    fn with_api_info(mut data: PlatformData, service: &str) -> PlatformData {
        let mut api_info = BTreeMap::new();
        api_info.insert(
            service.to_string(),
            ServiceInfo {
                version: Some(ApiVersion::Text("1.0".to_string())),
                service_type: None,
            },
        );
        data.api_info = Some(api_info);
        data
    }

    #[tokio::test]
    async fn test_all_healthy_admin_only() {
        let connector = Arc::new(ScriptedConnector::default());
        let checker = HealthChecker::new(connector.clone());
        let report = checker.check(&platform(Some("root"), &[])).await;
        assert_eq!(report, HealthReport::healthy());
        assert_eq!(connector.calls(), vec!["privileged:root"]);
    }

    #[tokio::test]
    async fn test_users_checked_before_admin() {
        let connector = Arc::new(ScriptedConnector::default());
        let checker = HealthChecker::new(connector.clone());
        let report = checker.check(&platform(Some("root"), &["u1", "u2"])).await;
        assert!(report.available);
        assert_eq!(
            connector.calls(),
            vec!["identity:u1", "identity:u2", "privileged:root"]
        );
    }

    #[tokio::test]
    async fn test_known_failure_surfaces_message_with_trace() {
        let connector = Arc::new(ScriptedConnector {
            basic_error: Some(|| ClientError::known("foo")),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector);
        let report = checker.check(&platform(None, &["u1"])).await;
        assert!(!report.available);
        assert_eq!(report.message.as_deref(), Some("foo"));
        let trace = report.traceback.expect("traceback expected");
        assert!(trace.contains("foo"));
        assert!(trace.contains("Backtrace:"));
    }

    #[tokio::test]
    async fn test_unexpected_admin_failure_redacts_creds() {
        let connector = Arc::new(ScriptedConnector {
            privileged_error: Some(|| ClientError::unexpected(anyhow::anyhow!("boom"))),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector);
        let report = checker.check(&platform(Some("balbab"), &[])).await;
        assert!(!report.available);
        let message = report.message.unwrap();
        assert!(message.starts_with("Bad admin creds: \n"));
        assert!(message.contains("\"username\": \"balbab\""));
        assert!(message.contains("\"password\": \"***\""));
        assert!(!message.contains("12345"));
        let trace = report.traceback.unwrap();
        assert!(trace.contains("boom"));
        assert!(trace.contains("Backtrace:"));
    }

    #[tokio::test]
    async fn test_unexpected_user_failure_uses_user_role() {
        let connector = Arc::new(ScriptedConnector {
            basic_error: Some(|| ClientError::unexpected(anyhow::anyhow!("boom"))),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector);
        let report = checker.check(&platform(None, &["balbab"])).await;
        assert!(report
            .message
            .unwrap()
            .starts_with("Bad user creds: \n"));
    }

    #[tokio::test]
    async fn test_fail_fast_stops_at_first_identity() {
        let connector = Arc::new(ScriptedConnector {
            basic_error: Some(|| ClientError::known("down")),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector.clone());
        let report = checker.check(&platform(Some("root"), &["u1", "u2"])).await;
        assert!(!report.available);
        assert_eq!(connector.calls(), vec!["identity:u1"]);
    }

    #[tokio::test]
    async fn test_api_info_checked_against_admin() {
        let connector = Arc::new(ScriptedConnector::default());
        let checker = HealthChecker::new(connector.clone());
        let data = with_api_info(platform(Some("root"), &["u1"]), "fakeclient");
        let report = checker.check(&data).await;
        assert_eq!(report, HealthReport::healthy());
        assert_eq!(
            connector.calls(),
            vec![
                "identity:u1",
                "privileged:root",
                "resolve:fakeclient",
                "validate:fakeclient",
                "create:fakeclient"
            ]
        );
    }

    #[tokio::test]
    async fn test_api_info_checked_against_first_user_without_admin() {
        let connector = Arc::new(ScriptedConnector::default());
        let checker = HealthChecker::new(connector.clone());
        let data = with_api_info(platform(None, &["u1", "u2"]), "fakeclient");
        let report = checker.check(&data).await;
        assert!(report.available);
        assert_eq!(
            connector.calls(),
            vec![
                "identity:u1",
                "resolve:fakeclient",
                "validate:fakeclient",
                "create:fakeclient",
                "identity:u2"
            ]
        );
    }

    #[tokio::test]
    async fn test_version_validation_failure_has_no_traceback() {
        let connector = Arc::new(ScriptedConnector {
            validate_error: Some(|| ClientError::known("Version is not supported.")),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector);
        let data = with_api_info(platform(Some("root"), &[]), "fakeclient");
        let report = checker.check(&data).await;
        assert_eq!(
            report,
            HealthReport::unavailable(
                "Invalid setting for 'fakeclient': Version is not supported."
            )
        );
        assert!(report.traceback.is_none());
    }

    #[tokio::test]
    async fn test_unexpected_client_creation_failure() {
        let connector = Arc::new(ScriptedConnector {
            create_error: Some(|| ClientError::unexpected(anyhow::anyhow!("Invalid client."))),
            ..Default::default()
        });
        let checker = HealthChecker::new(connector);
        let data = with_api_info(platform(Some("root"), &[]), "fakeclient");
        let report = checker.check(&data).await;
        assert!(!report.available);
        assert_eq!(
            report.message.as_deref(),
            Some("Can not create 'fakeclient' with 1.0 version.")
        );
        assert!(report.traceback.is_some());
    }
}
