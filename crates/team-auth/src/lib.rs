//! # Team Authentication
//!
//! This crate verifies the access tokens regional consoles attach to team
//! management requests.
//!
//! ## Overview
//!
//! The team-auth crate handles:
//! - **Claims**: The regional access token payload (`AccessClaims`)
//! - **JWT**: Token signing and validation with a shared secret
//! - **Credentials**: Extracting the token from request headers
//! - **Verification**: The `AuthVerifier` abstraction used by request handlers
//!
//! ## Features
//!
//! - `jwt` (default): JWT token support using jsonwebtoken
//!
//! ## Usage
//!
//! ```rust,no_run
//! use team_auth::{AuthVerifier, JwtService, RequestCredentials};
//!
//! async fn caller(header: &str) -> team_auth::AuthResult<uuid::Uuid> {
//!     let service = JwtService::with_secret("your-secret-key")?;
//!     let claims = service.verify(&RequestCredentials::new(header)).await?;
//!     Ok(claims.user_cr_uid)
//! }
//! ```

pub mod claims;
pub mod error;
#[cfg(feature = "jwt")]
pub mod jwt;
pub mod verifier;

// Re-export main types
pub use claims::AccessClaims;
pub use error::{AuthError, AuthResult};
pub use verifier::{AuthVerifier, RequestCredentials};

#[cfg(feature = "jwt")]
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService};
