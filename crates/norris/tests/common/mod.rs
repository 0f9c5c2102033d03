//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Stub the facts API over real HTTP

#![allow(dead_code)]

pub mod http_mock;
