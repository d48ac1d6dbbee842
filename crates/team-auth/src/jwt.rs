//! Access token signing and validation
//!
//! Regional consoles and this service share one HMAC secret. Tokens carry
//! [`AccessClaims`]; issuer and audience checks are optional.

use crate::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token service settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: Option<String>,

    /// Signing algorithm
    pub algorithm: JwtAlgorithm,

    /// Required `iss`, if any
    pub issuer: Option<String>,

    /// Accepted `aud` values; empty skips the check
    pub audience: Vec<String>,

    /// Tolerated clock skew in seconds
    pub leeway_secs: u64,

    /// Lifetime of tokens minted by [`JwtService::generate_access_token`]
    pub access_token_duration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: JwtAlgorithm::HS256,
            issuer: None,
            audience: Vec::new(),
            leeway_secs: 60,
            access_token_duration: Duration::days(7),
        }
    }
}

/// HMAC algorithms accepted for access tokens.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC-SHA256
    #[default]
    HS256,
    /// HMAC-SHA384
    HS384,
    /// HMAC-SHA512
    HS512,
}

impl From<JwtAlgorithm> for Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::HS384 => Algorithm::HS384,
            JwtAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// Signs and validates access tokens.
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Build a service from settings.
    ///
    /// Fails with [`AuthError::Misconfigured`] when the secret is absent or empty.
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        let secret = match config.secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.as_bytes(),
            _ => return Err(AuthError::Misconfigured("HMAC secret is not set".to_string())),
        };

        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Build an HS256 service with default settings.
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        Self::new(JwtConfig {
            secret: Some(secret.into()),
            ..Default::default()
        })
    }

    /// Mint an access token for a regional user.
    pub fn generate_access_token(
        &self,
        user_uid: Uuid,
        user_cr_uid: Uuid,
        user_cr_name: impl Into<String>,
        region_uid: Uuid,
    ) -> AuthResult<String> {
        let claims = AccessClaims::new(
            user_uid,
            user_cr_uid,
            user_cr_name,
            region_uid,
            self.config.access_token_duration,
        );
        self.encode_claims(&claims)
    }

    /// Sign the given claims.
    pub fn encode_claims(&self, claims: &AccessClaims) -> AuthResult<String> {
        jsonwebtoken::encode(&Header::new(self.config.algorithm.into()), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature, expiry and the optional issuer/audience, then decode.
    pub fn validate_token(&self, token: &str) -> AuthResult<AccessClaims> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(rejection)
    }

    /// Service settings.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.config.algorithm.into());
        validation.leeway = self.config.leeway_secs;

        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match self.config.audience.as_slice() {
            [] => validation.validate_aud = false,
            audience => validation.set_audience(audience),
        }

        validation
    }
}

fn rejection(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
        ErrorKind::InvalidSignature => AuthError::InvalidToken("signature mismatch".to_string()),
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("unexpected issuer".to_string()),
        ErrorKind::InvalidAudience => AuthError::InvalidToken("unexpected audience".to_string()),
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthError::InvalidToken("malformed token".to_string())
        }
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "region-console-shared-secret-for-tests";

    fn service() -> JwtService {
        JwtService::with_secret(SECRET).unwrap()
    }

    #[test]
    fn test_secret_is_required() {
        assert!(matches!(JwtService::new(JwtConfig::default()), Err(AuthError::Misconfigured(_))));
        assert!(matches!(JwtService::with_secret(""), Err(AuthError::Misconfigured(_))));
        assert_eq!(service().config().algorithm, JwtAlgorithm::HS256);
    }

    #[test]
    fn test_minted_token_validates() {
        let (user_uid, user_cr_uid, region_uid) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let token = service()
            .generate_access_token(user_uid, user_cr_uid, "alice", region_uid)
            .unwrap();
        let claims = service().validate_token(&token).unwrap();

        assert_eq!(claims.user_uid, user_uid);
        assert_eq!(claims.user_cr_uid, user_cr_uid);
        assert_eq!(claims.user_cr_name, "alice");
        assert_eq!(claims.region_uid, region_uid);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            service().validate_token("not.a.token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_other_region_secret_is_rejected() {
        let other = JwtService::with_secret("some-other-region-secret-value").unwrap();
        let token = other
            .generate_access_token(Uuid::new_v4(), Uuid::new_v4(), "alice", Uuid::new_v4())
            .unwrap();

        assert!(matches!(service().validate_token(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = AccessClaims::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "alice",
            Uuid::new_v4(),
            Duration::hours(-1),
        );
        let token = service().encode_claims(&claims).unwrap();

        assert!(matches!(service().validate_token(&token), Err(AuthError::TokenExpired)));
    }
}
