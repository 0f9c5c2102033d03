//! HTTP mock server helpers for testing the facts client.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/jokes/categories")
//!         .respond_with_json(json!(["dev", "food"]))
//!         .mount()
//!         .await;
//!
//!     let client = HttpFactClient::new(server.url()).unwrap();
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Query matching**: `.with_query("category", "food")`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`

use std::time::Duration;

use serde_json::Value;
pub use wiremock::matchers::{method, path, query_param};
pub use wiremock::MockServer as WiremockServer;
pub use wiremock::{Mock, Request, ResponseTemplate};

/// A `wiremock` server with a builder for GET stubs.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Base URL of the server, suitable for `HttpFactClient::new`.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for stubs the builder does not cover.
    pub fn inner(&self) -> &WiremockServer {
        &self.server
    }

    /// Start a stub for `GET path`.
    pub fn expect_get(&self, path: &str) -> GetStub<'_> {
        GetStub {
            server: &self.server,
            path: path.to_string(),
            query: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Assert every `expect_times` expectation was met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Every request the server received, in arrival order.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

enum StubBody {
    Json(Value),
    Raw(String),
}

/// Builder for a single GET stub. Nothing is registered until `mount`.
pub struct GetStub<'a> {
    server: &'a WiremockServer,
    path: String,
    query: Vec<(String, String)>,
    status: u16,
    body: Option<StubBody>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl GetStub<'_> {
    /// Only match requests carrying `key=value` in the query string.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(StubBody::Json(body));
        self
    }

    /// Respond with a raw body, which need not be JSON.
    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(StubBody::Raw(body.into()));
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach a JSON body to a status set with `respond_with_status`.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    /// Register the stub on the server.
    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            Some(StubBody::Json(body)) => template.set_body_json(body),
            Some(StubBody::Raw(body)) => template.set_body_string(body),
            None => template,
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut builder = Mock::given(method("GET")).and(path(self.path));
        for (key, value) in self.query {
            builder = builder.and(query_param(key, value));
        }

        let mut mock = builder.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }

        mock.mount(self.server).await;
    }
}
