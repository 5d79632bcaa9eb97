//! reqwest-backed catalog transport

use crate::{
    constants::{REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::LoadError,
    transport::{CatalogTransport, TransportResponse},
    types::CacheDirective,
};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::time::Duration;

/// HTTP transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an existing client (custom proxies, timeouts, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Builds a GET request carrying the headers for `cache`
    fn request(&self, url: &str, cache: Option<CacheDirective>) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);

        if let Some(directive) = cache {
            if let Some(value) = directive.cache_control() {
                request = request.header(CACHE_CONTROL, value);
            }
            if directive.sends_pragma() {
                request = request.header(PRAGMA, "no-cache");
            }
        }

        request
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        cache: Option<CacheDirective>,
    ) -> Result<TransportResponse, LoadError> {
        tracing::trace!(url, cache = ?cache, "GET");

        let response = self.request(url, cache).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cache: Option<CacheDirective>) -> reqwest::header::HeaderMap {
        let transport = HttpTransport::new().unwrap();
        let request = transport
            .request("https://example.invalid/data.json", cache)
            .build()
            .unwrap();
        request.headers().clone()
    }

    #[test]
    fn test_unset_directive_sends_no_cache_headers() {
        let h = headers(None);
        assert!(h.get(CACHE_CONTROL).is_none());
        assert!(h.get(PRAGMA).is_none());

        let h = headers(Some(CacheDirective::Default));
        assert!(h.get(CACHE_CONTROL).is_none());
    }

    #[test]
    fn test_directive_headers() {
        let h = headers(Some(CacheDirective::NoStore));
        assert_eq!(h.get(CACHE_CONTROL).unwrap(), "no-store");

        let h = headers(Some(CacheDirective::Reload));
        assert_eq!(h.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(h.get(PRAGMA).unwrap(), "no-cache");
    }
}
