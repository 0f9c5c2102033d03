//! Typed client for the Chuck Norris facts API.
//!
//! The service exposes three read-only endpoints: the list of fact
//! categories, a random fact, and a random fact restricted to a category.
//! [`HttpFactClient`] maps each endpoint onto one async call that performs
//! a single request and decodes the JSON body.
//!
//! ```ignore
//! use norris::{Category, FactApiClient, HttpFactClient};
//!
//! let client = HttpFactClient::new("https://api.chucknorris.io")?;
//! let fact = client.random_fact_by_category(&Category::new("food")).await?;
//! println!("{}", fact.value);
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod config;
pub mod facts;

pub use config::{ClientConfig, ConfigError, TransportConfig};
pub use facts::{Category, Fact, FactApiClient, FactApiError, HttpFactClient};
