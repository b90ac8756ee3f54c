//! Normalized platform data produced by spec normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::spec::ServiceInfo;

/// Auxiliary platform metadata returned alongside normalization.
///
/// Reserved for future use; currently always empty.
pub type PlatformMetadata = BTreeMap<String, serde_json::Value>;

/// The normalized credential set for one platform.
///
/// Constructed once per platform from an immutable spec and never mutated
/// afterwards; consumed by the health checker and the info reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformData {
    pub admin: Option<Identity>,
    pub users: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_info: Option<BTreeMap<String, ServiceInfo>>,
}

impl PlatformData {
    /// The identity used for platform-wide queries: the admin when present,
    /// otherwise the first user.
    pub fn primary_identity(&self) -> Option<&Identity> {
        self.admin.as_ref().or_else(|| self.users.first())
    }
}
