//! Access token errors
//!
//! A rejected token is an expected outcome and maps to 401. Only a verifier
//! that cannot do its job (missing secret, failed signing) is a server error.

use thiserror::Error;

/// Errors raised while extracting or verifying an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request carried no token
    #[error("No access token supplied")]
    MissingCredentials,

    /// The token is past its `exp`
    #[error("Access token expired")]
    TokenExpired,

    /// The token failed decoding or signature checks
    #[error("Access token rejected: {0}")]
    InvalidToken(String),

    /// A claim the verifier requires is absent
    #[error("Access token lacks claim '{0}'")]
    MissingClaim(String),

    /// The verifier itself is not usable
    #[error("Token verifier misconfigured: {0}")]
    Misconfigured(String),

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Result type for token operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Whether the failure lies with the service rather than the caller.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Misconfigured(_) | AuthError::Signing(_))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_server_error() {
            500
        } else {
            401
        }
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::MissingClaim(_) => "MISSING_CLAIM",
            AuthError::Misconfigured(_) => "VERIFIER_MISCONFIGURED",
            AuthError::Signing(_) => "SIGNING_FAILED",
        }
    }
}
