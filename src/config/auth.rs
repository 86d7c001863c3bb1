//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// HS256 keys shorter than this are refused.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 86_400;

/// Session token settings
///
/// Tokens are self-contained: the server keeps no session table, so the
/// secret and lifetime below are all the state the token service needs.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign and verify tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_BYTES));
        }
        if self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ValidationError::TokenTtlTooLong(MAX_TOKEN_TTL_SECS));
        }
        Ok(())
    }
}

// Hand-written so the secret never reaches logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

fn default_token_ttl() -> u64 {
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_secs, 86_400);
        assert_eq!(config.token_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(32))
        ));
    }

    #[test]
    fn test_validation_zero_ttl() {
        let config = AuthConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_secs: 0,
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTokenTtl)));
    }

    #[test]
    fn test_validation_huge_ttl() {
        let config = AuthConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_secs: u64::MAX,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::TokenTtlTooLong(MAX_TOKEN_TTL_SECS))
        ));

        let year = AuthConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_secs: MAX_TOKEN_TTL_SECS,
        };
        assert!(year.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            jwt_secret: SECRET.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            jwt_secret: SECRET.to_string(),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains(SECRET));
        assert!(printed.contains("REDACTED"));
    }
}
