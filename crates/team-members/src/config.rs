//! Member removal configuration.
//!
//! Configuration is loaded from environment variables with defaults suitable
//! for local development. The region id is required: it scopes every seat
//! accounting key and is injected into the remover at construction.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use team_rbac::GatewayEndpoint;
use thiserror::Error;
use uuid::Uuid;

/// Default end-to-end removal timeout in seconds.
pub const DEFAULT_REMOVAL_TIMEOUT_SECS: u64 = 30;

/// Largest accepted end-to-end removal timeout in seconds.
pub const MAX_REMOVAL_TIMEOUT_SECS: u64 = 3600;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration of the member removal service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalConfig {
    /// Region this deployment serves.
    pub region_uid: Uuid,

    /// End-to-end removal timeout in seconds.
    pub timeout_secs: u64,

    /// Role gateway endpoint.
    pub gateway: GatewayEndpoint,

    /// Access token signing secret.
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
}

impl Default for RemovalConfig {
    /// Returns default configuration suitable for local development.
    ///
    /// The nil region id is rejected by [`RemovalConfig::validate`].
    fn default() -> Self {
        Self {
            region_uid: Uuid::nil(),
            timeout_secs: DEFAULT_REMOVAL_TIMEOUT_SECS,
            gateway: GatewayEndpoint::default(),
            jwt_secret: None,
        }
    }
}

impl RemovalConfig {
    /// Create a configuration for the given region.
    pub fn for_region(region_uid: Uuid) -> Self {
        Self {
            region_uid,
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGION_UID`: Region UUID (required)
    /// - `REMOVAL_TIMEOUT_SECS`: Removal timeout in seconds (default: 30)
    /// - `ROLE_GATEWAY_URL`: Role gateway URL (default: http://localhost:2345)
    /// - `ROLE_GATEWAY_API_KEY`: Role gateway API key
    /// - `ROLE_GATEWAY_TIMEOUT_SECS`: Role gateway request timeout (default: 10)
    /// - `JWT_SECRET`: Access token signing secret
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let region_raw = lookup("REGION_UID").ok_or_else(|| ConfigError::MissingEnvVar("REGION_UID".to_string()))?;
        let region_uid = Uuid::try_parse(region_raw.trim()).map_err(|e| ConfigError::InvalidValue {
            key: "REGION_UID".to_string(),
            message: e.to_string(),
        })?;

        let config = Self {
            region_uid,
            timeout_secs: parse_number(&lookup, "REMOVAL_TIMEOUT_SECS")?.unwrap_or(default.timeout_secs),
            gateway: GatewayEndpoint {
                base_url: lookup("ROLE_GATEWAY_URL").unwrap_or(default.gateway.base_url),
                api_key: lookup("ROLE_GATEWAY_API_KEY").filter(|s| !s.is_empty()),
                timeout_secs: parse_number(&lookup, "ROLE_GATEWAY_TIMEOUT_SECS")?
                    .unwrap_or(default.gateway.timeout_secs),
            },
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Get the removal timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate values that would make every removal fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_uid.is_nil() {
            return Err(ConfigError::InvalidValue {
                key: "REGION_UID".to_string(),
                message: "region id must not be nil".to_string(),
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_REMOVAL_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                key: "REMOVAL_TIMEOUT_SECS".to_string(),
                message: format!("timeout must be between 1 and {} seconds", MAX_REMOVAL_TIMEOUT_SECS),
            });
        }
        Ok(())
    }

    /// Validate that all required configuration is present for production.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.jwt_secret.is_none() {
            return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()));
        }
        if self.gateway.api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("ROLE_GATEWAY_API_KEY".to_string()));
        }
        Ok(())
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a number, got '{}'", raw),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RemovalConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_err());
        assert!(RemovalConfig::for_region(Uuid::new_v4()).validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let region = Uuid::new_v4();
        let region_raw = region.to_string();
        let config = RemovalConfig::from_lookup(lookup_from(&[
            ("REGION_UID", region_raw.as_str()),
            ("REMOVAL_TIMEOUT_SECS", "5"),
            ("ROLE_GATEWAY_URL", "http://rbac.internal"),
            ("ROLE_GATEWAY_API_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.region_uid, region);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.gateway.base_url, "http://rbac.internal");
        assert_eq!(config.gateway.api_key.as_deref(), Some("key"));
        assert_eq!(config.gateway.timeout_secs, 10);
    }

    #[test]
    fn test_missing_region() {
        let result = RemovalConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref key)) if key == "REGION_UID"));
    }

    #[test]
    fn test_invalid_values() {
        let result = RemovalConfig::from_lookup(lookup_from(&[("REGION_UID", "not-a-uuid")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let region = Uuid::new_v4().to_string();
        let result = RemovalConfig::from_lookup(lookup_from(&[
            ("REGION_UID", region.as_str()),
            ("REMOVAL_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { ref key, .. }) if key == "REMOVAL_TIMEOUT_SECS"));
    }

    #[test]
    fn test_timeout_bounds() {
        let region = Uuid::new_v4().to_string();
        for raw in ["0", "3601", "18446744073709551615"] {
            let result = RemovalConfig::from_lookup(lookup_from(&[
                ("REGION_UID", region.as_str()),
                ("REMOVAL_TIMEOUT_SECS", raw),
            ]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { ref key, .. }) if key == "REMOVAL_TIMEOUT_SECS"),
                "timeout {} was accepted",
                raw
            );
        }

        let config = RemovalConfig::from_lookup(lookup_from(&[
            ("REGION_UID", region.as_str()),
            ("REMOVAL_TIMEOUT_SECS", "3600"),
        ]))
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(MAX_REMOVAL_TIMEOUT_SECS));
    }

    #[test]
    fn test_validate_for_production() {
        let mut config = RemovalConfig::for_region(Uuid::new_v4());
        assert!(config.validate_for_production().is_err());

        config.jwt_secret = Some("secret".to_string());
        config.gateway.api_key = Some("key".to_string());
        assert!(config.validate_for_production().is_ok());
    }
}
