use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. norris.yaml file (if exists)
/// 3. Environment variables with NORRIS_ prefix (always wins)
///
/// [`HttpFactClient::new`](crate::HttpFactClient::new) never reads any of
/// these sources; it uses [`ClientConfig::default`] with the given base URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Root of the facts API, without the `/jokes/...` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy for all outbound requests. `None` disables proxying, including
    /// any `HTTP_PROXY`/`HTTPS_PROXY` set in the process environment.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Deadline for a whole request/response exchange, in seconds.
    /// Default: none (only connection setup is bounded).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransportConfig {
    /// TCP connect timeout in seconds (default: 30).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// TCP keep-alive interval in seconds (default: 35).
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// TLS handshake budget in seconds (default: 10). Must not exceed
    /// `connect_timeout_secs`, which bounds the handshake too.
    #[serde(default = "default_tls_handshake_timeout_secs")]
    pub tls_handshake_timeout_secs: u64,

    /// Idle pooled connections kept per host (default: 500).
    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

impl TransportConfig {
    #[must_use]
    pub const fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    /// Deadline for establishing a connection.
    ///
    /// reqwest bounds TCP connect and TLS handshake with a single timeout,
    /// so the dial budget covers both and the TLS budget can never exceed it.
    #[must_use]
    pub const fn connect_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.chucknorris.io".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_connect_timeout_secs() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_keep_alive_secs() -> u64 {
    35
}

#[allow(clippy::missing_const_for_fn)]
fn default_tls_handshake_timeout_secs() -> u64 {
    10
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_idle_per_host() -> usize {
    500
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            keep_alive_secs: default_keep_alive_secs(),
            tls_handshake_timeout_secs: default_tls_handshake_timeout_secs(),
            max_idle_per_host: default_max_idle_per_host(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            request_timeout_secs: None,
            transport: TransportConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. norris.yaml file (if exists)
    /// 3. Environment variables with NORRIS_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("norris.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("NORRIS_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The base URL is only checked for presence; a malformed URL is
    /// reported by the first request made with it.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "base_url is required. Set NORRIS_BASE_URL environment variable or configure in norris.yaml.".into(),
            ));
        }

        if self.transport.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "transport.connect_timeout_secs cannot be 0".into(),
            ));
        }

        if self.transport.tls_handshake_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "transport.tls_handshake_timeout_secs cannot be 0".into(),
            ));
        }

        if self.transport.tls_handshake_timeout_secs > self.transport.connect_timeout_secs {
            return Err(ConfigError::Validation(format!(
                "transport.tls_handshake_timeout_secs ({}) cannot exceed transport.connect_timeout_secs ({})",
                self.transport.tls_handshake_timeout_secs, self.transport.connect_timeout_secs
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request_timeout_secs cannot be 0; omit it to disable the deadline".into(),
            ));
        }

        if let Some(proxy) = &self.proxy {
            if !proxy.starts_with("http://") && !proxy.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "proxy '{proxy}' is invalid. Must start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}
