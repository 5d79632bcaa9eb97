//! URL resolution abstractions
//!
//! A catalog URL is either a literal or the output of a `UrlResolver`. A
//! resolver receives a `VersionLookup` so it can pin the URL to the latest
//! published package version without the caller tracking releases.

use crate::error::LoadError;
use async_trait::async_trait;

/// Capability that reports the latest published version of a package
#[async_trait]
pub trait VersionLookup: Send + Sync {
    /// Returns the latest published version of `package` (e.g. "1.4.2")
    async fn latest_version(&self, package: &str) -> Result<String, LoadError>;
}

/// Async function from a version lookup to the catalog URL
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Produces the URL to fetch
    ///
    /// # Arguments
    /// * `versions` - Lookup for the latest published package version
    async fn resolve(&self, versions: &dyn VersionLookup) -> Result<String, LoadError>;
}
