//! Role gateway endpoint configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default role gateway URL for local development.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:2345";

/// Default request timeout in seconds.
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;

/// Configuration for the role gateway endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayEndpoint {
    /// Base URL for the gateway (e.g., "https://rbac.internal").
    pub base_url: String,

    /// API key for service-to-service authentication.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GatewayEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
        }
    }
}

impl GatewayEndpoint {
    /// Create an endpoint for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
