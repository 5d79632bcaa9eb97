//! Constants for the currency catalog
//!
//! Compile-time defaults for every remote endpoint the catalog talks to.
//! Runtime overrides go through `CatalogOptions` (see `config.rs`).

/// CDN base that serves published npm packages
pub const CDN_BASE_URL: &str = "https://cdn.jsdelivr.net/npm";

/// npm package that publishes the catalog snapshots
pub const CATALOG_PACKAGE: &str = "@vdegenne/cmc";

/// Minified catalog (id, name, symbol, slug) inside the package
pub const MINI_ASSET_PATH: &str = "data/mini.json";

/// Full catalog (rank, status, platform, history bounds) inside the package
pub const FULL_ASSET_PATH: &str = "data/all.json";

/// npm registry used to resolve the latest published version
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// HTTP request timeout for catalog and registry requests (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent for HTTP requests
pub const USER_AGENT: &str = concat!("currency-catalog/", env!("CARGO_PKG_VERSION"));

/// CoinMarketCap listing endpoint used by the dataset builder
pub const CMC_MAP_ALL_URL: &str = "https://api.coinmarketcap.com/data-api/v3/map/all";

/// Page size for the dataset builder
pub const CMC_PAGE_LIMIT: usize = 10_000;

/// Base for 64x64 currency icons
pub const CMC_ICON_BASE_URL: &str = "https://s2.coinmarketcap.com/static/img/coins/64x64";

/// Base for currency pages
pub const CMC_CURRENCY_PAGE_URL: &str = "https://coinmarketcap.com/currencies";

/// Environment variable overriding the catalog URL with a literal
pub const ENV_CATALOG_URL: &str = "CURRENCY_CATALOG_URL";

/// Environment variable toggling prefetch on construction
pub const ENV_CATALOG_PREFETCH: &str = "CURRENCY_CATALOG_PREFETCH";

/// Environment variable selecting the cache directive
pub const ENV_CATALOG_CACHE: &str = "CURRENCY_CATALOG_CACHE";

/// Environment variable enabling lifecycle debug events
pub const ENV_CATALOG_DEBUG: &str = "CURRENCY_CATALOG_DEBUG";
