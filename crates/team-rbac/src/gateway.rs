//! Role mutation gateway abstraction
//!
//! The gateway applies workspace role changes to the platform's actual
//! permission bindings. It is an external system; calls may fail transiently
//! and are never retried here.

use async_trait::async_trait;
use thiserror::Error;

use crate::mutation::RoleMutation;

/// Role gateway error types.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the gateway.
        message: String,
    },

    /// Gateway could not be reached.
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    /// Authentication against the gateway failed.
    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Check if the caller may reasonably retry the operation.
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            GatewayError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            GatewayError::Api { status, .. } => *status >= 500 || *status == 429,
            GatewayError::Unavailable(_) => true,
            GatewayError::AuthenticationFailed => false,
        }
    }
}

/// Applies role mutations to platform permission bindings.
#[async_trait]
pub trait RoleMutationGateway: Send + Sync {
    /// Apply a single role mutation.
    async fn mutate_role(&self, mutation: &RoleMutation) -> GatewayResult<()>;
}
