//! Facts API client module.
//!
//! # Architecture
//!
//! - [`FactApiClient`] - Trait defining API operations
//! - [`HttpFactClient`] - Real HTTP implementation using reqwest
//! - `mock::MockFactClient` - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! Use `MockFactClient` when the code under test only needs facts:
//!
//! ```ignore
//! use norris::facts::mock::MockFactClient;
//!
//! let mock = MockFactClient::new();
//! mock.set_list_categories_result(Ok(vec![Category::new("dev")]));
//! let result = my_service.pick_category(&mock).await;
//! assert_eq!(mock.list_categories_calls(), 1);
//! ```
//!
//! Test `HttpFactClient` itself against a `wiremock` server; see
//! `tests/common/http_mock.rs`.

mod client;
mod types;

pub use client::{FactApiClient, FactApiError, HttpFactClient};
pub use types::{Category, Fact};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
