//! Catalog configuration
//!
//! Callers describe overrides with `CatalogOptions`; construction resolves
//! them once into an immutable `CatalogConfig`. No merging happens after
//! that point.
//!
//! ```
//! use currency_catalog::{CacheDirective, CatalogOptions};
//!
//! let config = CatalogOptions::new()
//!     .prefetch(false)
//!     .literal_url("https://cdn.example.com/mini.json")
//!     .cache_directive(CacheDirective::NoCache)
//!     .resolve();
//!
//! assert!(!config.prefetch);
//! assert_eq!(config.cache_directive, Some(CacheDirective::NoCache));
//! ```

use crate::{
    constants::{ENV_CATALOG_CACHE, ENV_CATALOG_DEBUG, ENV_CATALOG_PREFETCH, ENV_CATALOG_URL},
    resolver::UrlResolver,
    sources::CdnResolver,
    types::{CacheDirective, CurrencyRecord},
};
use std::fmt;
use std::sync::Arc;

/// Where the catalog document comes from
#[derive(Clone)]
pub enum UrlSource {
    /// Fixed URL, used verbatim
    Literal(String),
    /// URL computed per load, typically pinned to the latest published version
    Resolver(Arc<dyn UrlResolver>),
}

impl UrlSource {
    /// Literal URL source
    pub fn literal(url: impl Into<String>) -> Self {
        Self::Literal(url.into())
    }

    /// Resolver-backed URL source
    pub fn resolver(resolver: impl UrlResolver + 'static) -> Self {
        Self::Resolver(Arc::new(resolver))
    }
}

impl Default for UrlSource {
    fn default() -> Self {
        Self::resolver(CdnResolver::default())
    }
}

impl fmt::Debug for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlSource::Literal(url) => f.debug_tuple("Literal").field(url).finish(),
            UrlSource::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Caller overrides; unset fields fall back to defaults on `resolve`
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    prefetch: Option<bool>,
    init_data: Option<Vec<CurrencyRecord>>,
    remote_url: Option<UrlSource>,
    cache_directive: Option<CacheDirective>,
    debug: Option<bool>,
}

impl CatalogOptions {
    /// Empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides read from `CURRENCY_CATALOG_*` environment variables
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(url) = lookup(ENV_CATALOG_URL).filter(|u| !u.trim().is_empty()) {
            options.remote_url = Some(UrlSource::literal(url.trim()));
        }
        if let Some(raw) = lookup(ENV_CATALOG_PREFETCH) {
            options.prefetch = parse_flag(ENV_CATALOG_PREFETCH, &raw);
        }
        if let Some(raw) = lookup(ENV_CATALOG_DEBUG) {
            options.debug = parse_flag(ENV_CATALOG_DEBUG, &raw);
        }
        if let Some(raw) = lookup(ENV_CATALOG_CACHE) {
            match raw.parse::<CacheDirective>() {
                Ok(directive) => options.cache_directive = Some(directive),
                Err(e) => tracing::warn!(var = ENV_CATALOG_CACHE, error = %e, "Ignoring cache directive"),
            }
        }

        options
    }

    /// Start a load on construction (default: true)
    pub fn prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = Some(prefetch);
        self
    }

    /// Seed the snapshot synchronously; disables prefetch
    pub fn init_data(mut self, records: Vec<CurrencyRecord>) -> Self {
        self.init_data = Some(records);
        self
    }

    /// Catalog URL source (default: latest minified catalog on the CDN)
    pub fn remote_url(mut self, source: UrlSource) -> Self {
        self.remote_url = Some(source);
        self
    }

    /// Shorthand for `remote_url(UrlSource::literal(url))`
    pub fn literal_url(self, url: impl Into<String>) -> Self {
        self.remote_url(UrlSource::literal(url))
    }

    /// Cache directive applied to catalog fetches (default: unset)
    pub fn cache_directive(mut self, directive: CacheDirective) -> Self {
        self.cache_directive = Some(directive);
        self
    }

    /// Emit lifecycle events through `tracing` (default: false)
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Merges the overrides onto the defaults
    pub fn resolve(self) -> CatalogConfig {
        CatalogConfig {
            prefetch: self.prefetch.unwrap_or(true),
            init_data: self.init_data.map(Arc::from),
            remote_url: self.remote_url.unwrap_or_default(),
            cache_directive: self.cache_directive,
            debug: self.debug.unwrap_or(false),
        }
    }
}

/// Resolved, immutable catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub prefetch: bool,
    pub init_data: Option<Arc<[CurrencyRecord]>>,
    pub remote_url: UrlSource,
    pub cache_directive: Option<CacheDirective>,
    pub debug: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogOptions::default().resolve()
    }
}

fn parse_flag(var: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(var, value = raw, "Ignoring non-boolean flag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert!(config.prefetch);
        assert!(config.init_data.is_none());
        assert!(matches!(config.remote_url, UrlSource::Resolver(_)));
        assert_eq!(config.cache_directive, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_overrides_win() {
        let config = CatalogOptions::new()
            .prefetch(false)
            .debug(true)
            .init_data(vec![CurrencyRecord::new(1, "A", "A", "a")])
            .literal_url("https://example.com/mini.json")
            .resolve();

        assert!(!config.prefetch);
        assert!(config.debug);
        assert_eq!(config.init_data.as_deref().map(<[_]>::len), Some(1));
        match config.remote_url {
            UrlSource::Literal(url) => assert_eq!(url, "https://example.com/mini.json"),
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_env_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_CATALOG_URL, " https://mirror.example.com/mini.json "),
            (ENV_CATALOG_PREFETCH, "off"),
            (ENV_CATALOG_DEBUG, "maybe"),
            (ENV_CATALOG_CACHE, "reload"),
        ]
        .into_iter()
        .collect();

        let config = CatalogOptions::from_lookup(|k| env.get(k).map(|v| v.to_string())).resolve();

        assert!(!config.prefetch);
        assert!(!config.debug);
        assert_eq!(config.cache_directive, Some(CacheDirective::Reload));
        assert!(
            matches!(config.remote_url, UrlSource::Literal(ref u) if u == "https://mirror.example.com/mini.json")
        );
    }
}
