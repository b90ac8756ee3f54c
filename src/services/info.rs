//! Platform info reporting.

use std::sync::Arc;

use crate::domain::models::{PlatformData, PlatformInfo, PlatformInfoBody, ServiceEntry};
use crate::domain::ports::{ClientError, ClientResult, CloudConnector, UNKNOWN_SERVICE_NAME};

/// Describes a platform by enumerating its service catalog.
pub struct InfoReporter<C: CloudConnector> {
    connector: Arc<C>,
}

impl<C: CloudConnector> InfoReporter<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Enumerate the services visible to the platform's primary identity,
    /// sorted by service type. Services whose display name is unknown are
    /// reported without a name.
    pub async fn info(&self, data: &PlatformData) -> ClientResult<PlatformInfo> {
        let active = data
            .primary_identity()
            .ok_or_else(|| ClientError::known("platform has no credentials to query with"))?;

        let services = self
            .connector
            .service_name_map(active)
            .await?
            .into_iter()
            .map(|(service_type, name)| ServiceEntry {
                service_type,
                name: (name != UNKNOWN_SERVICE_NAME).then_some(name),
            })
            .collect();

        Ok(PlatformInfo {
            info: PlatformInfoBody { services },
        })
    }
}
