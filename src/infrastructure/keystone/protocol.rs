//! Keystone wire protocol helpers: token request payloads, token response
//! parsing, and the supported-version table. Pure functions, no I/O.

use serde_json::{json, Value};

use crate::domain::models::{ApiVersion, Identity};
use crate::domain::ports::UNKNOWN_SERVICE_NAME;

/// A parsed token: the roles granted to the user and the service catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenInfo {
    pub roles: Vec<String>,
    /// `(service_type, display_name)` pairs; unnamed services carry
    /// [`UNKNOWN_SERVICE_NAME`].
    pub catalog: Vec<(String, String)>,
}

impl TokenInfo {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// True when the identity should authenticate against Keystone v2.
///
/// Normalized identities always carry domain defaults, so the auth URL's
/// version suffix is the deciding signal.
pub fn is_v2(identity: &Identity) -> bool {
    identity.auth_url.trim_end_matches('/').ends_with("/v2.0")
}

/// Token issuance URL for the identity's protocol generation.
pub fn token_url(identity: &Identity) -> String {
    let base = identity.auth_url.trim_end_matches('/');
    if is_v2(identity) {
        format!("{base}/tokens")
    } else if base.ends_with("/v3") {
        format!("{base}/auth/tokens")
    } else {
        format!("{base}/v3/auth/tokens")
    }
}

/// v2 password authentication payload.
pub fn v2_auth_payload(identity: &Identity) -> Value {
    let mut auth = json!({
        "passwordCredentials": {
            "username": identity.username,
            "password": identity.password,
        }
    });
    if let Some(ref tenant) = identity.tenant_name {
        auth["tenantName"] = json!(tenant);
    }
    json!({ "auth": auth })
}

/// v3 password authentication payload, scoped by domain when the identity
/// carries a `domain_name`, otherwise by project.
pub fn v3_auth_payload(identity: &Identity) -> Value {
    let user_domain = identity.user_domain_name.as_deref().unwrap_or("default");
    let mut auth = json!({
        "identity": {
            "methods": ["password"],
            "password": {
                "user": {
                    "name": identity.username,
                    "password": identity.password,
                    "domain": {"name": user_domain},
                }
            }
        }
    });
    if let Some(ref domain) = identity.domain_name {
        auth["scope"] = json!({"domain": {"name": domain}});
    } else if let Some(ref project) = identity.tenant_name {
        let project_domain = identity
            .project_domain_name
            .as_deref()
            .unwrap_or("default");
        auth["scope"] = json!({
            "project": {"name": project, "domain": {"name": project_domain}}
        });
    }
    json!({ "auth": auth })
}

fn parse_roles(roles: Option<&Value>) -> Vec<String> {
    roles
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|r| r["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_catalog(entries: Option<&Value>) -> Vec<(String, String)> {
    entries
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|entry| {
                    let service_type = entry["type"].as_str()?.to_string();
                    let name = entry["name"]
                        .as_str()
                        .filter(|n| !n.is_empty())
                        .unwrap_or(UNKNOWN_SERVICE_NAME)
                        .to_string();
                    Some((service_type, name))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a v3 `POST /auth/tokens` response body.
pub fn parse_v3_token(body: &Value) -> TokenInfo {
    TokenInfo {
        roles: parse_roles(body.pointer("/token/roles")),
        catalog: parse_catalog(body.pointer("/token/catalog")),
    }
}

/// Parse a v2 `POST /tokens` response body.
pub fn parse_v2_token(body: &Value) -> TokenInfo {
    TokenInfo {
        roles: parse_roles(body.pointer("/access/user/roles")),
        catalog: parse_catalog(body.pointer("/access/serviceCatalog")),
    }
}

/// API versions this adapter knows how to reach, newest last.
pub fn supported_versions(service: &str) -> Option<&'static [&'static str]> {
    Some(match service {
        "keystone" => &["2", "2.0", "3"],
        "nova" => &["2", "2.1"],
        "cinder" => &["1", "2", "3"],
        "glance" => &["1", "2"],
        "neutron" => &["2", "2.0"],
        "swift" | "heat" => &["1"],
        "octavia" => &["2"],
        _ => return None,
    })
}

/// Newest supported version for a service.
pub fn default_version(service: &str) -> Option<ApiVersion> {
    supported_versions(service)
        .and_then(|versions| versions.last())
        .map(|v| ApiVersion::Text((*v).to_string()))
}

/// Catalog service type a service registers under at a given version.
pub fn default_service_type(service: &str, version: &ApiVersion) -> Option<String> {
    let version = version.to_string();
    Some(match service {
        "keystone" => {
            if version.starts_with('3') {
                "identityv3".to_string()
            } else {
                "identity".to_string()
            }
        }
        "nova" => "compute".to_string(),
        "cinder" => {
            if version.starts_with('1') {
                "volume".to_string()
            } else {
                format!("volumev{}", &version[..1])
            }
        }
        "glance" => "image".to_string(),
        "neutron" => "network".to_string(),
        "swift" => "object-store".to_string(),
        "heat" => "orchestration".to_string(),
        "octavia" => "load-balancer".to_string(),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(auth_url: &str) -> Identity {
        Identity {
            auth_url: auth_url.to_string(),
            username: "user".to_string(),
            password: "pass".to_string(),
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

    #[test]
    fn test_token_url_variants() {
        assert_eq!(
            token_url(&identity("https://ks.test/v2.0")),
            "https://ks.test/v2.0/tokens"
        );
        assert_eq!(
            token_url(&identity("https://ks.test/v3")),
            "https://ks.test/v3/auth/tokens"
        );
        assert_eq!(
            token_url(&identity("https://ks.test/")),
            "https://ks.test/v3/auth/tokens"
        );
    }

    #[test]
    fn test_v2_payload_shape() {
        let payload = v2_auth_payload(&identity("https://ks.test/v2.0"));
        assert_eq!(
            payload,
            serde_json::json!({
                "auth": {
                    "passwordCredentials": {"username": "user", "password": "pass"},
                    "tenantName": "demo"
                }
            })
        );
    }

    #[test]
    fn test_v3_payload_project_scope() {
        let payload = v3_auth_payload(&identity("https://ks.test/v3"));
        assert_eq!(
            payload["auth"]["scope"],
            serde_json::json!({"project": {"name": "demo", "domain": {"name": "default"}}})
        );
        assert_eq!(
            payload["auth"]["identity"]["password"]["user"]["domain"]["name"],
            "default"
        );
    }

    #[test]
    fn test_v3_payload_domain_scope_wins() {
        let mut id = identity("https://ks.test/v3");
        id.domain_name = Some("mydomain".to_string());
        let payload = v3_auth_payload(&id);
        assert_eq!(
            payload["auth"]["scope"],
            serde_json::json!({"domain": {"name": "mydomain"}})
        );
    }

    #[test]
    fn test_parse_v3_token() {
        let body = serde_json::json!({
            "token": {
                "roles": [{"name": "admin"}, {"name": "member"}],
                "catalog": [
                    {"type": "compute", "name": "nova"},
                    {"type": "volumev4", "name": ""}
                ]
            }
        });
        let token = parse_v3_token(&body);
        assert!(token.has_role("Admin"));
        assert_eq!(
            token.catalog,
            vec![
                ("compute".to_string(), "nova".to_string()),
                ("volumev4".to_string(), UNKNOWN_SERVICE_NAME.to_string())
            ]
        );
    }

    #[test]
    fn test_parse_v2_token() {
        let body = serde_json::json!({
            "access": {
                "user": {"roles": [{"name": "member"}]},
                "serviceCatalog": [{"type": "identity", "name": "keystone"}]
            }
        });
        let token = parse_v2_token(&body);
        assert!(!token.has_role("admin"));
        assert_eq!(token.catalog.len(), 1);
    }

    #[test]
    fn test_version_table() {
        assert!(supported_versions("nova").unwrap().contains(&"2.1"));
        assert!(supported_versions("gnocchi").is_none());
        assert_eq!(
            default_version("keystone"),
            Some(ApiVersion::Text("3".to_string()))
        );
    }

    #[test]
    fn test_default_service_type() {
        assert_eq!(
            default_service_type("cinder", &ApiVersion::int(2)).as_deref(),
            Some("volumev2")
        );
        assert_eq!(
            default_service_type("cinder", &ApiVersion::int(1)).as_deref(),
            Some("volume")
        );
        assert_eq!(
            default_service_type("keystone", &ApiVersion::int(3)).as_deref(),
            Some("identityv3")
        );
        assert_eq!(default_service_type("gnocchi", &ApiVersion::int(1)), None);
    }
}
