//! Version-pinned CDN URL resolver

use crate::{
    constants::{CATALOG_PACKAGE, CDN_BASE_URL, FULL_ASSET_PATH, MINI_ASSET_PATH},
    error::LoadError,
    resolver::{UrlResolver, VersionLookup},
};
use async_trait::async_trait;

/// Builds `<cdn_base>/<package>@<version>/<asset_path>` from the latest
/// published version of `package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnResolver {
    cdn_base: String,
    package: String,
    asset_path: String,
}

impl CdnResolver {
    /// Creates a resolver for an arbitrary package asset
    pub fn new(cdn_base: &str, package: &str, asset_path: &str) -> Self {
        Self {
            cdn_base: cdn_base.trim_end_matches('/').to_string(),
            package: package.to_string(),
            asset_path: asset_path.trim_start_matches('/').to_string(),
        }
    }

    /// Resolver for the full catalog (rank, status, platform, history bounds)
    pub fn full_catalog() -> Self {
        Self::new(CDN_BASE_URL, CATALOG_PACKAGE, FULL_ASSET_PATH)
    }

    /// Package whose version is looked up
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Formats the pinned URL for `version`
    pub fn pinned_url(&self, version: &str) -> String {
        format!(
            "{}/{}@{}/{}",
            self.cdn_base, self.package, version, self.asset_path
        )
    }
}

impl Default for CdnResolver {
    /// Resolver for the minified catalog
    fn default() -> Self {
        Self::new(CDN_BASE_URL, CATALOG_PACKAGE, MINI_ASSET_PATH)
    }
}

#[async_trait]
impl UrlResolver for CdnResolver {
    async fn resolve(&self, versions: &dyn VersionLookup) -> Result<String, LoadError> {
        let version = versions.latest_version(&self.package).await?;
        Ok(self.pinned_url(&version))
    }
}
