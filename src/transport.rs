//! Transport abstraction for fetching catalog documents

use crate::{error::LoadError, types::CacheDirective};
use async_trait::async_trait;

/// Raw response of a single GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status
    pub status_text: String,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    /// Builds a 200 response carrying `body`
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Builds a response with an arbitrary status and empty body
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for catalog transports
///
/// Implementations perform a single GET. Status handling and parsing stay
/// with the caller so every transport reports failures the same way.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches `url`, applying `cache` when one is given
    ///
    /// # Arguments
    /// * `url` - Absolute URL to fetch
    /// * `cache` - Cache directive, or `None` to let the transport decide
    ///
    /// # Returns
    /// The response, whatever its status, or an error if no response arrived
    async fn get(
        &self,
        url: &str,
        cache: Option<CacheDirective>,
    ) -> Result<TransportResponse, LoadError>;

    /// Returns the name of this transport
    fn transport_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Semaphore;

    /// Mock transport for testing
    ///
    /// Routes are matched by exact URL. A held URL blocks until `release`
    /// is called once per pending request.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        routes: Arc<Mutex<HashMap<String, Result<TransportResponse, LoadError>>>>,
        gates: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
        calls: Arc<Mutex<Vec<(String, Option<CacheDirective>)>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_body(&self, url: &str, body: &str) {
            self.set_response(url, Ok(TransportResponse::ok(body)));
        }

        pub fn set_response(&self, url: &str, response: Result<TransportResponse, LoadError>) {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), response);
        }

        pub fn hold(&self, url: &str) {
            self.gates
                .lock()
                .unwrap()
                .insert(url.to_string(), Arc::new(Semaphore::new(0)));
        }

        pub fn release(&self, url: &str) {
            if let Some(gate) = self.gates.lock().unwrap().get(url) {
                gate.add_permits(1);
            }
        }

        pub fn calls(&self) -> Vec<(String, Option<CacheDirective>)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CatalogTransport for MockTransport {
        async fn get(
            &self,
            url: &str,
            cache: Option<CacheDirective>,
        ) -> Result<TransportResponse, LoadError> {
            self.calls.lock().unwrap().push((url.to_string(), cache));

            let gate = self.gates.lock().unwrap().get(url).cloned();
            if let Some(gate) = gate {
                gate.acquire().await.unwrap().forget();
            }

            self.routes
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or_else(|| Ok(TransportResponse::status(404, "Not Found")))
        }

        fn transport_name(&self) -> &'static str {
            "mock"
        }
    }
}
