//! npm registry version lookup

use crate::{
    constants::NPM_REGISTRY_URL,
    error::LoadError,
    resolver::VersionLookup,
    transport::CatalogTransport,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Registry response for `<package>/latest`
#[derive(Debug, Deserialize)]
struct LatestManifest {
    #[serde(default)]
    version: Option<String>,
}

/// Resolves the latest published version from an npm-compatible registry
pub struct RegistryVersionLookup {
    transport: Arc<dyn CatalogTransport>,
    registry_url: String,
}

impl RegistryVersionLookup {
    /// Creates a lookup against the public npm registry
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self::with_registry(transport, NPM_REGISTRY_URL)
    }

    /// Creates a lookup against a custom registry
    pub fn with_registry(transport: Arc<dyn CatalogTransport>, registry_url: &str) -> Self {
        Self {
            transport,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.registry_url, package)
    }
}

#[async_trait]
impl VersionLookup for RegistryVersionLookup {
    async fn latest_version(&self, package: &str) -> Result<String, LoadError> {
        let url = self.latest_url(package);
        let response = self
            .transport
            .get(&url, None)
            .await
            .map_err(|e| LoadError::version(format!("{package}: {e}")))?;

        if !response.is_success() {
            return Err(LoadError::version(format!(
                "{package}: registry answered {} {}",
                response.status, response.status_text
            )));
        }

        let manifest: LatestManifest = serde_json::from_str(&response.body)
            .map_err(|e| LoadError::version(format!("{package}: invalid manifest: {e}")))?;

        match manifest.version {
            Some(version) if !version.trim().is_empty() => Ok(version.trim().to_string()),
            _ => Err(LoadError::version(format!(
                "{package}: manifest has no version"
            ))),
        }
    }
}
