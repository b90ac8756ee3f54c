//! Building a credential spec from `OS_*` environment variables.
//!
//! Mirrors the conventions of an `openrc` file: one admin credential plus
//! shared connection settings, with two identity protocol generations that
//! need different scoping fields.

use std::collections::{BTreeMap, HashMap};

use crate::domain::models::{ApiVersion, CredentialSpec, EnvDiscovery, RawIdentity, ServiceInfo};

const REQUIRED_VARS: [&str; 3] = ["OS_AUTH_URL", "OS_USERNAME", "OS_PASSWORD"];

/// Strings accepted as "true" by `OS_INSECURE`; anything else is false.
fn truthy(value: Option<&String>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "t" | "true" | "on" | "y" | "yes"
        )
    })
}

/// Assemble a credential spec from environment-style key/value pairs.
///
/// Never fails: missing or inconsistent variables come back as an
/// unavailable [`EnvDiscovery`] with an explanatory message.
pub fn spec_from_env(vars: &HashMap<String, String>) -> EnvDiscovery {
    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|v| !vars.contains_key(*v))
        .collect();
    if !missing.is_empty() {
        return EnvDiscovery::missing(format!(
            "The following variable(s) are missed: {}",
            missing.join(", ")
        ));
    }

    let tenant_name = vars
        .get("OS_PROJECT_NAME")
        .or_else(|| vars.get("OS_TENANT_NAME"))
        .cloned();
    let endpoint_type = vars
        .get("OS_ENDPOINT_TYPE")
        .or_else(|| vars.get("OS_INTERFACE"))
        .map(|v| v.replace("URL", ""));

    let mut admin = RawIdentity {
        username: vars["OS_USERNAME"].clone(),
        password: vars["OS_PASSWORD"].clone(),
        tenant_name: tenant_name.clone(),
        project_name: None,
        domain_name: None,
        user_domain_name: None,
        project_domain_name: None,
    };

    let user_domain_name = vars.get("OS_USER_DOMAIN_NAME").cloned();
    let project_domain_name = vars.get("OS_PROJECT_DOMAIN_NAME").cloned();
    let domain_name = vars.get("OS_DOMAIN_NAME").cloned();
    let identity_api_version = vars
        .get("OS_IDENTITY_API_VERSION")
        .or_else(|| vars.get("IDENTITY_API_VERSION"));

    let modern = identity_api_version.map_or_else(
        || {
            user_domain_name.is_some() || project_domain_name.is_some() || domain_name.is_some()
        },
        |v| v == "3",
    );

    let keystone = if modern {
        if project_domain_name.is_none() && domain_name.is_none() {
            return EnvDiscovery::missing(
                "One of OS_PROJECT_NAME/OS_PROJECT_DOMAIN_NAME or OS_DOMAIN_NAME \
                 should be specified.",
            );
        }
        admin.user_domain_name = Some(user_domain_name.unwrap_or_else(|| "Default".to_string()));
        if let Some(domain) = domain_name {
            admin.domain_name = Some(domain);
        } else {
            admin.project_name = admin.tenant_name.take();
            admin.project_domain_name =
                Some(project_domain_name.unwrap_or_else(|| "Default".to_string()));
        }
        ServiceInfo {
            version: Some(ApiVersion::int(3)),
            service_type: Some("identityv3".to_string()),
        }
    } else {
        if tenant_name.is_none() {
            return EnvDiscovery::missing(
                "One of OS_PROJECT_NAME or OS_TENANT_NAME should be specified.",
            );
        }
        ServiceInfo {
            version: Some(ApiVersion::int(2)),
            service_type: Some("identity".to_string()),
        }
    };

    let mut api_info = BTreeMap::new();
    api_info.insert("keystone".to_string(), keystone);

    let spec = CredentialSpec {
        auth_url: vars["OS_AUTH_URL"].clone(),
        admin: Some(admin),
        endpoint_type,
        region_name: Some(vars.get("OS_REGION_NAME").cloned().unwrap_or_default()),
        https_cacert: Some(vars.get("OS_CACERT").cloned().unwrap_or_default()),
        https_cert: Some(vars.get("OS_CERT").cloned().unwrap_or_default()),
        https_key: Some(vars.get("OS_KEY").cloned().unwrap_or_default()),
        https_insecure: Some(truthy(vars.get("OS_INSECURE"))),
        profiler_hmac_key: vars.get("OSPROFILER_HMAC_KEY").cloned(),
        profiler_conn_str: vars.get("OSPROFILER_CONN_STR").cloned(),
        api_info: Some(api_info),
        ..Default::default()
    };

    EnvDiscovery::found(spec)
}
