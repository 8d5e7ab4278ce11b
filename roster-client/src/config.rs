//! Client configuration

use crate::error::ClientResult;
use crate::http::NetworkCollectionClient;

/// Remote collection used when no other base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Client configuration for one remote employee collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Collection URL (e.g., "http://localhost:8080/api/employees")
    pub base_url: String,

    /// Request timeout in seconds; `None` (or `0`) leaves the platform default in place
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a configuration for the given collection URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the collection URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout; `0` clears it
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = (seconds > 0).then_some(seconds);
        self
    }

    /// Create a network client from this configuration
    pub fn build_network_client(&self) -> ClientResult<NetworkCollectionClient> {
        NetworkCollectionClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
