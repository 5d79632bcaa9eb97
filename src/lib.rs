//! # Currency Catalog
//!
//! Resolves cryptocurrency ticker symbols to CoinMarketCap metadata
//! (id, name, symbol, slug) from a catalog snapshot published on a CDN.
//!
//! ## Important: This is NOT a price feed
//!
//! The catalog fetches a static snapshot once (or when asked) and serves
//! lookups from memory for the lifetime of the process.
//!
//! ## Usage
//!
//! ```no_run
//! use currency_catalog::{CatalogOptions, CurrencyCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Starts loading the latest published snapshot right away
//! let catalog = CurrencyCatalog::new(CatalogOptions::default())?;
//! catalog.ready().await?;
//!
//! // Relisted tickers are appended after their delisted namesakes,
//! // so from_last = true prefers the current listing
//! let eth = catalog.get_currency_from_symbol("eth", true)?;
//! println!("{:?}", eth);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! CurrencyCatalog::load_remote()
//!     ↓
//! UrlSource (literal, or CdnResolver → RegistryVersionLookup)
//!     ↓
//! CatalogTransport (HttpTransport)
//!     ↓
//! SnapshotStore (whole-snapshot replacement)
//!     ↓
//! Your Code (get_currency_from_symbol, get_all)
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use currency_catalog::{CurrencyCatalog, LookupError};
//!
//! # fn example(catalog: &CurrencyCatalog) {
//! match catalog.get_currency_from_symbol("BTC", false) {
//!     Ok(Some(btc)) => println!("BTC is #{}", btc.id),
//!     Ok(None) => println!("Unknown symbol"),
//!     Err(LookupError::Loading) => println!("Await catalog.ready() first"),
//!     Err(LookupError::NotLoaded) => println!("Call load_remote() first"),
//! }
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod links;
pub mod metrics;
pub mod observer;
pub mod resolver;
pub mod sources;
pub mod store;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use catalog::{CurrencyCatalog, LoadHandle};
pub use config::{CatalogConfig, CatalogOptions, UrlSource};
pub use error::{BuildError, LoadError, LookupError};
pub use links::{icon_url, page_url};
pub use metrics::LoadMetrics;
pub use observer::{CatalogEvent, CatalogObserver, NoopObserver, TracingObserver};
pub use resolver::{UrlResolver, VersionLookup};
pub use store::Snapshot;
pub use transport::{CatalogTransport, TransportResponse};
pub use types::{CacheDirective, Currency, CurrencyRecord, LoadState};
