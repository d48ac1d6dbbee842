//! Request credential verification
//!
//! Callers present their access token in the `Authorization` header, either
//! raw or as `Bearer <token>`, possibly URL-encoded by the browser client.

use async_trait::async_trait;

use crate::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};

/// Credentials attached to an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
}

impl RequestCredentials {
    /// Credentials carrying the given header value.
    pub fn new(authorization: impl Into<String>) -> Self {
        Self {
            authorization: Some(authorization.into()),
        }
    }

    /// Credentials carrying `Bearer <token>`.
    pub fn bearer(token: impl AsRef<str>) -> Self {
        Self::new(format!("Bearer {}", token.as_ref()))
    }

    /// Extract the token, stripping a `Bearer` prefix and URL encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_auth::RequestCredentials;
    ///
    /// let credentials = RequestCredentials::new("Bearer abc.def%2Eghi");
    /// assert_eq!(credentials.token().unwrap(), "abc.def.ghi");
    /// ```
    pub fn token(&self) -> AuthResult<String> {
        let raw = self
            .authorization
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let decoded = urlencoding::decode(raw)
            .map_err(|e| AuthError::InvalidToken(format!("Invalid encoding: {}", e)))?;

        let token = match decoded.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            _ => &*decoded,
        };

        if token.is_empty() || token.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MissingCredentials);
        }

        Ok(token.to_string())
    }
}

/// Verifies request credentials and yields the caller's claims.
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    /// Verify the credentials of an incoming request.
    async fn verify(&self, credentials: &RequestCredentials) -> AuthResult<AccessClaims>;
}

#[cfg(feature = "jwt")]
#[async_trait]
impl AuthVerifier for crate::jwt::JwtService {
    async fn verify(&self, credentials: &RequestCredentials) -> AuthResult<AccessClaims> {
        let token = credentials.token()?;
        let claims = self.validate_token(&token)?;
        tracing::debug!(user_cr_uid = %claims.user_cr_uid, "Access token verified");
        Ok(claims)
    }
}
