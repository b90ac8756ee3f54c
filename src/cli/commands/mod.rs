pub mod check;
pub mod cleanup;
pub mod env;
pub mod info;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::{CredentialSpec, PlatformData, ProbeConfig};
use crate::infrastructure::{ConfigLoader, KeystoneConnector};
use crate::services::SpecNormalizer;

/// Load configuration, honoring an explicit config file when given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ProbeConfig> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Read, validate, and normalize a spec file.
pub(crate) fn load_platform(spec_path: &Path, config: &ProbeConfig) -> Result<PlatformData> {
    let raw = std::fs::read_to_string(spec_path)
        .with_context(|| format!("failed to read spec file {}", spec_path.display()))?;
    let spec: CredentialSpec = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse spec file {}", spec_path.display()))?;
    spec.validate()?;

    let normalizer = SpecNormalizer::new(config.domains.clone());
    let (data, _) = normalizer.normalize(&spec);
    Ok(data)
}

pub(crate) fn connector() -> Arc<KeystoneConnector> {
    Arc::new(KeystoneConnector::new())
}
