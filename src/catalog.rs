//! Currency catalog manager
//!
//! Owns the snapshot lifecycle: when to fetch, how the URL is resolved, and
//! how lookups behave before, during and after a load.

use crate::{
    config::{CatalogConfig, CatalogOptions, UrlSource},
    error::{LoadError, LookupError},
    metrics::{LoadMetrics, MetricsCollector},
    observer::{CatalogEvent, CatalogObserver, NoopObserver, TracingObserver},
    resolver::VersionLookup,
    sources::{HttpTransport, RegistryVersionLookup},
    store::{find_by_symbol, Snapshot, SnapshotStore},
    transport::CatalogTransport,
    types::{CacheDirective, CurrencyRecord, LoadState},
};
use futures::future::{self, BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Cloneable handle to a load operation
///
/// Every clone resolves to the same outcome once the load settles.
pub type LoadHandle = Shared<BoxFuture<'static, Result<(), LoadError>>>;

/// Currency catalog
///
/// Resolves ticker symbols to currency metadata from a snapshot fetched
/// from a CDN (or supplied up front).
///
/// # Example
/// ```no_run
/// use currency_catalog::{CatalogOptions, CurrencyCatalog};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = CurrencyCatalog::new(CatalogOptions::default())?;
/// catalog.ready().await?;
///
/// if let Some(btc) = catalog.get_currency_from_symbol("btc", false)? {
///     println!("{} is #{}", btc.name, btc.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CurrencyCatalog {
    config: Arc<CatalogConfig>,
    transport: Arc<dyn CatalogTransport>,
    versions: Arc<dyn VersionLookup>,
    observer: Arc<dyn CatalogObserver>,
    store: Arc<SnapshotStore>,
    metrics: Arc<MetricsCollector>,
    in_flight: Arc<AtomicUsize>,
    current: Mutex<Option<LoadHandle>>,
}

impl CurrencyCatalog {
    /// Creates a catalog backed by the HTTP transport
    ///
    /// Fails only if the HTTP client cannot be built. Load failures are
    /// reported through `ready()`, never here.
    pub fn new(options: CatalogOptions) -> Result<Self, LoadError> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(options, transport))
    }

    /// Creates a catalog with a custom transport
    ///
    /// The observer follows the `debug` flag.
    pub fn with_transport(options: CatalogOptions, transport: Arc<dyn CatalogTransport>) -> Self {
        let config = options.resolve();
        let observer: Arc<dyn CatalogObserver> = if config.debug {
            Arc::new(TracingObserver)
        } else {
            Arc::new(NoopObserver)
        };
        Self::build(config, transport, observer)
    }

    /// Creates a catalog with a custom transport and observer
    pub fn with_observer(
        options: CatalogOptions,
        transport: Arc<dyn CatalogTransport>,
        observer: Arc<dyn CatalogObserver>,
    ) -> Self {
        Self::build(options.resolve(), transport, observer)
    }

    fn build(
        config: CatalogConfig,
        transport: Arc<dyn CatalogTransport>,
        observer: Arc<dyn CatalogObserver>,
    ) -> Self {
        observer.on_event(&CatalogEvent::ConstructionStarted {
            prefetch: config.prefetch,
            has_init_data: config.init_data.is_some(),
        });

        let store = match &config.init_data {
            Some(records) => SnapshotStore::with_snapshot(records.clone()),
            None => SnapshotStore::new(),
        };
        let versions: Arc<dyn VersionLookup> =
            Arc::new(RegistryVersionLookup::new(transport.clone()));

        let catalog = Self {
            config: Arc::new(config),
            transport,
            versions,
            observer,
            store: Arc::new(store),
            metrics: Arc::new(MetricsCollector::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            current: Mutex::new(None),
        };

        if catalog.config.init_data.is_none() && catalog.config.prefetch {
            // Outcome is observable through ready()
            let _ = catalog.load_remote(None);
        }

        catalog.observer.on_event(&CatalogEvent::ConstructionFinished {
            state: catalog.state(),
        });

        catalog
    }

    /// Starts a new load and makes it the one `ready()` tracks
    ///
    /// Earlier handles keep resolving to their own outcome. The snapshot is
    /// only replaced on success; concurrent loads race and the last to
    /// finish wins.
    ///
    /// The load is spawned on the current tokio runtime. Outside a runtime
    /// it runs when the handle is first awaited.
    ///
    /// # Arguments
    /// * `cache` - Cache directive for this load; falls back to the configured one
    pub fn load_remote(&self, cache: Option<CacheDirective>) -> LoadHandle {
        let cache = cache.or(self.config.cache_directive);
        let task = LoadTask {
            config: self.config.clone(),
            transport: self.transport.clone(),
            versions: self.versions.clone(),
            observer: self.observer.clone(),
            store: self.store.clone(),
            metrics: self.metrics.clone(),
            _in_flight: InFlight::enter(&self.in_flight),
        };

        let handle = spawn_shared(task.run(cache));
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle.clone());
        handle
    }

    /// Handle of the most recently started load
    ///
    /// Resolves immediately with `Ok(())` if no load was ever started.
    pub fn ready(&self) -> LoadHandle {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| future::ready(Ok::<(), LoadError>(())).boxed().shared())
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoadState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            LoadState::Loading
        } else if self.store.has_snapshot() {
            LoadState::Ready
        } else {
            LoadState::Unloaded
        }
    }

    /// Finds a currency by ticker symbol
    ///
    /// # Arguments
    /// * `symbol` - Ticker symbol, compared case-insensitively
    /// * `from_last` - Prefer the last matching entry (relisted coins are
    ///   appended after their delisted namesakes)
    ///
    /// # Returns
    /// The matching record, `None` on a miss, or an error if no snapshot exists
    pub fn get_currency_from_symbol(
        &self,
        symbol: &str,
        from_last: bool,
    ) -> Result<Option<CurrencyRecord>, LookupError> {
        let snapshot = self.loaded_snapshot()?;
        let found = find_by_symbol(&snapshot, symbol, from_last).cloned();

        self.observer.on_event(&CatalogEvent::LookupResolved {
            symbol: symbol.to_string(),
            from_last,
            id: found.as_ref().map(|c| c.id),
        });

        Ok(found)
    }

    /// Full snapshot in source order
    pub fn get_all(&self) -> Result<Snapshot, LookupError> {
        self.loaded_snapshot()
    }

    /// Resolved configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Name of the underlying transport
    pub fn transport_name(&self) -> &'static str {
        self.transport.transport_name()
    }

    /// Load counts, last failure and recent snapshot sizes
    pub async fn load_metrics(&self) -> LoadMetrics {
        self.metrics.report().await
    }

    /// Snapshot if present. Otherwise `Loading` while a first load is
    /// outstanding, else `NotLoaded`.
    fn loaded_snapshot(&self) -> Result<Snapshot, LookupError> {
        match self.store.snapshot() {
            Some(snapshot) => Ok(snapshot),
            None if self.in_flight.load(Ordering::SeqCst) > 0 => Err(LookupError::Loading),
            None => Err(LookupError::NotLoaded),
        }
    }
}

/// Counts an outstanding load for as long as it is alive
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Everything one load needs, detached from the catalog
struct LoadTask {
    config: Arc<CatalogConfig>,
    transport: Arc<dyn CatalogTransport>,
    versions: Arc<dyn VersionLookup>,
    observer: Arc<dyn CatalogObserver>,
    store: Arc<SnapshotStore>,
    metrics: Arc<MetricsCollector>,
    _in_flight: InFlight,
}

impl LoadTask {
    async fn run(self, cache: Option<CacheDirective>) -> Result<(), LoadError> {
        let start = Instant::now();

        match self.fetch_records(cache).await {
            Ok((url, records)) => {
                let count = self.store.replace(records.into());
                self.metrics.record_success(start.elapsed(), count).await;
                self.observer
                    .on_event(&CatalogEvent::FetchSucceeded { url, records: count });
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failure(start.elapsed(), &e).await;
                tracing::warn!(error = %e, "Failed to load currency catalog");
                self.observer.on_event(&CatalogEvent::FetchFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn fetch_records(
        &self,
        cache: Option<CacheDirective>,
    ) -> Result<(String, Vec<CurrencyRecord>), LoadError> {
        let url = self.resolve_url().await?;
        self.observer.on_event(&CatalogEvent::FetchStarted {
            url: url.clone(),
            cache,
        });

        let response = self.transport.get(&url, cache).await?;
        if !response.is_success() {
            return Err(LoadError::remote(response.status, response.status_text));
        }

        let records: Vec<CurrencyRecord> = serde_json::from_str(&response.body)?;
        Ok((url, records))
    }

    async fn resolve_url(&self) -> Result<String, LoadError> {
        match &self.config.remote_url {
            UrlSource::Literal(url) => Ok(url.clone()),
            UrlSource::Resolver(resolver) => resolver.resolve(self.versions.as_ref()).await,
        }
    }
}

/// Runs `load` on the ambient runtime and wraps it in a shared handle
fn spawn_shared<F>(load: F) -> LoadHandle
where
    F: Future<Output = Result<(), LoadError>> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            let join = runtime.spawn(load);
            async move {
                join.await
                    .unwrap_or_else(|e| Err(LoadError::Aborted(e.to_string())))
            }
            .boxed()
            .shared()
        }
        Err(_) => {
            tracing::debug!("No tokio runtime; catalog load deferred until awaited");
            load.boxed().shared()
        }
    }
}
