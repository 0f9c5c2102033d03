//! Facts API client.
//!
//! [`FactApiClient`] is the seam callers program against;
//! [`HttpFactClient`] is the reqwest-backed implementation. Each call is one
//! request and one JSON decode, with no caching and no retries.
//!
//! # Example
//!
//! ```ignore
//! use norris::{FactApiClient, HttpFactClient};
//!
//! let client = HttpFactClient::new("https://api.chucknorris.io")?;
//! for category in client.list_categories().await? {
//!     println!("{category}");
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Category, Fact};
use crate::config::ClientConfig;

const CATEGORIES_PATH: &str = "/jokes/categories";
const RANDOM_PATH: &str = "/jokes/random";

/// Errors that can occur when calling the facts API.
///
/// A failed call never yields a partial result.
#[derive(Debug, Error)]
pub enum FactApiError {
    /// The HTTP transport could not be built (TLS backend, proxy URL)
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be constructed, usually a malformed base URL
    #[error("invalid request: {0}")]
    InvalidUrl(#[source] reqwest::Error),

    /// Connection, DNS, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read to the end
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// API returned a non-success status
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The body is not JSON of the expected shape
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for facts API operations.
///
/// Use `HttpFactClient` for real HTTP calls, or
/// `mock::MockFactClient` (behind the `test-utils` feature) in tests.
#[async_trait]
pub trait FactApiClient: Send + Sync {
    /// List the categories the service knows about, in service order.
    async fn list_categories(&self) -> Result<Vec<Category>, FactApiError>;

    /// Fetch a random fact from any category.
    async fn random_fact(&self) -> Result<Fact, FactApiError>;

    /// Fetch a random fact from `category`.
    ///
    /// An empty category sends the same request as
    /// [`random_fact`](Self::random_fact).
    async fn random_fact_by_category(&self, category: &Category) -> Result<Fact, FactApiError>;
}

/// HTTP-based implementation of `FactApiClient`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFactClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFactClient {
    /// Create a client for `base_url` with the default transport settings.
    ///
    /// The URL is not validated here; a malformed URL fails every request
    /// with [`FactApiError::InvalidUrl`]. No connection is opened until the
    /// first call.
    ///
    /// # Errors
    /// Returns [`FactApiError::Client`] if the HTTP transport cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FactApiError> {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    /// Create a client from an explicit configuration.
    ///
    /// Proxying is enabled only when `config.proxy` is set; proxy variables
    /// in the process environment are ignored.
    ///
    /// # Errors
    /// Returns [`FactApiError::Client`] if the proxy URL is rejected or the
    /// HTTP transport cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FactApiError> {
        let transport = &config.transport;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(transport.connect_deadline())
            .tcp_keepalive(transport.keep_alive())
            .pool_max_idle_per_host(transport.max_idle_per_host);

        builder = match &config.proxy {
            Some(proxy) => {
                builder.proxy(reqwest::Proxy::all(proxy.as_str()).map_err(FactApiError::Client)?)
            }
            None => builder.no_proxy(),
        };

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(FactApiError::Client)?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Send one request and decode its body as `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, FactApiError> {
        let request = request.build().map_err(FactApiError::InvalidUrl)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending facts API request");

        let response = self.client.execute(request).await.map_err(|err| {
            // reqwest defers some URL checks (e.g. unsupported scheme) to send time
            if err.is_builder() {
                FactApiError::InvalidUrl(err)
            } else {
                FactApiError::Transport(err)
            }
        })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "facts API responded");

        let body = response.bytes().await.map_err(FactApiError::Body)?;

        // The body is decoded whatever the status; a non-2xx status only
        // replaces the decode error when the body is not of the expected shape.
        serde_json::from_slice(&body).map_err(|err| {
            if status.is_success() {
                FactApiError::Decode(err)
            } else {
                FactApiError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                }
            }
        })
    }
}

#[async_trait]
impl FactApiClient for HttpFactClient {
    async fn list_categories(&self) -> Result<Vec<Category>, FactApiError> {
        let request = self.client.get(self.endpoint(CATEGORIES_PATH));

        self.fetch(request).await.inspect_err(|err| {
            tracing::warn!(error = %err, "Failed to list fact categories");
        })
    }

    async fn random_fact(&self) -> Result<Fact, FactApiError> {
        let request = self.client.get(self.endpoint(RANDOM_PATH));

        self.fetch(request).await.inspect_err(|err| {
            tracing::warn!(error = %err, "Failed to fetch random fact");
        })
    }

    async fn random_fact_by_category(&self, category: &Category) -> Result<Fact, FactApiError> {
        let mut request = self.client.get(self.endpoint(RANDOM_PATH));

        if !category.is_empty() {
            request = request.query(&[("category", category.as_str())]);
        }

        self.fetch(request).await.inspect_err(|err| {
            tracing::warn!(error = %err, %category, "Failed to fetch random fact for category");
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{Category, Fact, FactApiClient, FactApiError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `FactApiClient` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods and verify calls with
    /// the `*_calls()` accessors. A programmed result is returned once; later
    /// calls fall back to an empty category list or a 404 status error.
    pub struct MockFactClient {
        list_categories_result: Mutex<Option<Result<Vec<Category>, FactApiError>>>,
        random_fact_result: Mutex<Option<Result<Fact, FactApiError>>>,
        list_categories_calls: Mutex<usize>,
        random_fact_calls: Mutex<Vec<Option<Category>>>,
    }

    impl MockFactClient {
        pub fn new() -> Self {
            Self {
                list_categories_result: Mutex::new(None),
                random_fact_result: Mutex::new(None),
                list_categories_calls: Mutex::new(0),
                random_fact_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `list_categories` call.
        pub fn set_list_categories_result(&self, result: Result<Vec<Category>, FactApiError>) {
            *self.list_categories_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `random_fact` or
        /// `random_fact_by_category` call.
        pub fn set_random_fact_result(&self, result: Result<Fact, FactApiError>) {
            *self.random_fact_result.lock().unwrap() = Some(result);
        }

        /// Number of `list_categories` calls.
        pub fn list_categories_calls(&self) -> usize {
            *self.list_categories_calls.lock().unwrap()
        }

        /// Category filter of every random-fact call: `None` for
        /// `random_fact`, `Some` for `random_fact_by_category`.
        pub fn random_fact_calls(&self) -> Vec<Option<Category>> {
            self.random_fact_calls.lock().unwrap().clone()
        }

        fn next_fact(&self) -> Result<Fact, FactApiError> {
            self.random_fact_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(FactApiError::Status {
                        status: 404,
                        body: String::new(),
                    })
                })
        }
    }

    impl Default for MockFactClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl FactApiClient for MockFactClient {
        async fn list_categories(&self) -> Result<Vec<Category>, FactApiError> {
            *self.list_categories_calls.lock().unwrap() += 1;

            self.list_categories_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn random_fact(&self) -> Result<Fact, FactApiError> {
            self.random_fact_calls.lock().unwrap().push(None);
            self.next_fact()
        }

        async fn random_fact_by_category(
            &self,
            category: &Category,
        ) -> Result<Fact, FactApiError> {
            self.random_fact_calls
                .lock()
                .unwrap()
                .push(Some(category.clone()));
            self.next_fact()
        }
    }
}
