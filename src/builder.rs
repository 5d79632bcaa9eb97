//! Offline dataset builder
//!
//! Pages through the CoinMarketCap listing API and writes the two files the
//! catalog is published from: `all.json` (full records) and `mini.json`
//! (id, name, symbol, slug).

use crate::{
    constants::{CMC_MAP_ALL_URL, CMC_PAGE_LIMIT},
    error::{BuildError, LoadError},
    transport::CatalogTransport,
    types::{Currency, CurrencyRecord, MapAllResponse},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the full catalog
pub const ALL_FILE: &str = "all.json";

/// File name of the minified catalog
pub const MINI_FILE: &str = "mini.json";

/// Paths written by `write_outputs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub all: PathBuf,
    pub mini: PathBuf,
}

/// Fetches every listed currency, one page at a time
pub struct CatalogBuilder {
    transport: Arc<dyn CatalogTransport>,
    api_url: String,
    page_limit: usize,
}

impl CatalogBuilder {
    /// Creates a builder against the public listing API
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self {
            transport,
            api_url: CMC_MAP_ALL_URL.to_string(),
            page_limit: CMC_PAGE_LIMIT,
        }
    }

    /// Overrides the listing endpoint
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    /// Overrides the page size (at least 1)
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    fn page_url(&self, start: usize) -> String {
        format!(
            "{}?listing_status=active,untracked&exchangeAux=is_active,status&cryptoAux=is_active,status&start={}&limit={}",
            self.api_url, start, self.page_limit
        )
    }

    /// Fetches one page starting at the 1-based offset `start`
    pub async fn fetch_page(&self, start: usize) -> Result<Vec<Currency>, LoadError> {
        let url = self.page_url(start);
        let response = self.transport.get(&url, None).await?;

        if !response.is_success() {
            return Err(LoadError::remote(response.status, response.status_text));
        }

        let page: MapAllResponse = serde_json::from_str(&response.body)?;
        if let Some(status) = page.status.as_ref() {
            if let Some(code) = status.error_code.as_deref().filter(|c| *c != "0") {
                tracing::warn!(
                    start,
                    error_code = code,
                    error_message = status.error_message.as_deref().unwrap_or_default(),
                    "Listing API reported an error"
                );
            }
        }

        Ok(page.data.crypto_currency_map.unwrap_or_default())
    }

    /// Fetches pages until one comes back empty
    pub async fn fetch_all(&self) -> Result<Vec<Currency>, LoadError> {
        let mut start = 1;
        let mut all = Vec::new();

        loop {
            tracing::info!(
                from = start,
                to = start + self.page_limit - 1,
                "Fetching currencies"
            );

            let page = self.fetch_page(start).await?;
            if page.is_empty() {
                break;
            }

            all.extend(page);
            start += self.page_limit;
        }

        Ok(all)
    }
}

/// Writes `all.json` and `mini.json` into `dir`, creating it if needed
pub async fn write_outputs(dir: &Path, currencies: &[Currency]) -> Result<CatalogFiles, BuildError> {
    tokio::fs::create_dir_all(dir).await?;

    let files = CatalogFiles {
        all: dir.join(ALL_FILE),
        mini: dir.join(MINI_FILE),
    };

    tokio::fs::write(&files.all, serde_json::to_vec(currencies)?).await?;
    tracing::info!(count = currencies.len(), path = %files.all.display(), "Saved full catalog");

    let mini: Vec<CurrencyRecord> = currencies.iter().map(CurrencyRecord::from).collect();
    tokio::fs::write(&files.mini, serde_json::to_vec(&mini)?).await?;
    tracing::info!(path = %files.mini.display(), "Saved mini catalog");

    Ok(files)
}
