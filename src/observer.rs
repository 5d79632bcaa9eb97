//! Lifecycle observers
//!
//! The catalog reports lifecycle points to a `CatalogObserver` instead of
//! logging directly. `debug = true` selects `TracingObserver`; otherwise
//! events go to `NoopObserver`.

use crate::types::{CacheDirective, LoadState};
use std::fmt;

/// Lifecycle point reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// Construction began
    ConstructionStarted { prefetch: bool, has_init_data: bool },
    /// Construction finished
    ConstructionFinished { state: LoadState },
    /// Fetch of the resolved URL is about to start
    FetchStarted {
        url: String,
        cache: Option<CacheDirective>,
    },
    /// Snapshot replaced
    FetchSucceeded { url: String, records: usize },
    /// Load failed; snapshot untouched
    FetchFailed { error: String },
    /// Symbol lookup finished
    LookupResolved {
        symbol: String,
        from_last: bool,
        id: Option<i64>,
    },
}

impl fmt::Display for CatalogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogEvent::ConstructionStarted {
                prefetch,
                has_init_data,
            } => write!(
                f,
                "Constructing catalog (prefetch: {}, init data: {})",
                prefetch, has_init_data
            ),
            CatalogEvent::ConstructionFinished { state } => {
                write!(f, "Catalog constructed ({:?})", state)
            }
            CatalogEvent::FetchStarted { url, .. } => write!(f, "Fetching {}", url),
            CatalogEvent::FetchSucceeded { url, records } => {
                write!(f, "Loaded {} currencies from {}", records, url)
            }
            CatalogEvent::FetchFailed { error } => write!(f, "Load failed: {}", error),
            CatalogEvent::LookupResolved {
                symbol,
                id: Some(id),
                ..
            } => write!(f, "{} -> {}", symbol, id),
            CatalogEvent::LookupResolved { symbol, .. } => write!(f, "{} -> none", symbol),
        }
    }
}

/// Sink for catalog lifecycle events
pub trait CatalogObserver: Send + Sync {
    fn on_event(&self, event: &CatalogEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CatalogObserver for NoopObserver {
    fn on_event(&self, _event: &CatalogEvent) {}
}

/// Forwards events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CatalogObserver for TracingObserver {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::FetchFailed { error } => {
                tracing::debug!(error = %error, "Currency catalog load failed")
            }
            CatalogEvent::LookupResolved {
                symbol,
                from_last,
                id,
            } => tracing::debug!(symbol = %symbol, from_last, id = ?id, "Currency lookup"),
            other => tracing::debug!("{}", other),
        }
    }
}
