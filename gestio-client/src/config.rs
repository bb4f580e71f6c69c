//! Client configuration

use crate::error::ClientResult;
use crate::http::HttpBackend;

/// Configuration for connecting to a GestioStock backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Drop inactive products when assembling catalog snapshots
    pub active_products_only: bool,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            active_products_only: false,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Keep only active products in catalog snapshots
    pub fn with_active_products_only(mut self, enabled: bool) -> Self {
        self.active_products_only = enabled;
        self
    }

    /// Create an HTTP backend from this configuration
    pub fn build_backend(&self) -> ClientResult<HttpBackend> {
        HttpBackend::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
