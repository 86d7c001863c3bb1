//! HS256 JWT implementation of the `TokenService` port.
//!
//! Tokens carry `sub` (the user's email), `iat` and `exp`. Nothing is stored
//! server-side; a token is valid exactly when its signature checks out and
//! the supplied clock is before `exp`.
//!
//! # Example
//!
//! ```ignore
//! use askfmi::adapters::auth::JwtTokenService;
//! use askfmi::ports::TokenService;
//!
//! let service = JwtTokenService::new(secret, Duration::from_secs(86_400));
//! let issued = service.issue("alice@example.com")?;
//! assert_eq!(service.verify(&issued.token)?, "alice@example.com");
//! ```

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, Timestamp};
use crate::ports::{IssuedToken, TokenError, TokenService};

/// Signed claims of a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared HMAC secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(secret: Secret<String>, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Secret::new(config.jwt_secret.clone()), config.token_ttl())
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue_at(&self, subject: &str, issued_at: Timestamp) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at
            .plus_secs(self.ttl_secs)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: issued_at.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }

    fn verify_at(&self, token: &str, now: Timestamp) -> Result<String, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AuthError::InvalidToken
            })?;

        if now.as_unix_secs() >= data.claims.exp {
            tracing::debug!("Rejected expired session token");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "askfmi-test-secret-0123456789abcdef0123";
    const DAY: u64 = 86_400;

    fn service() -> JwtTokenService {
        JwtTokenService::new(Secret::new(SECRET.to_string()), Duration::from_secs(DAY))
    }

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_705_276_800).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Issue / verify window
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn issued_token_verifies_to_subject() {
        let service = service();
        let issued = service.issue("alice@example.com").unwrap();

        assert_eq!(service.verify(&issued.token).unwrap(), "alice@example.com");
        assert_eq!(issued.subject, "alice@example.com");
    }

    #[test]
    fn expiry_is_issued_at_plus_ttl() {
        let issued = service().issue_at("alice@example.com", t0()).unwrap();
        assert_eq!(issued.issued_at, t0());
        assert_eq!(issued.expires_at, t0().plus_secs(DAY as i64).unwrap());
    }

    #[test]
    fn token_is_valid_until_the_last_second() {
        let service = service();
        let issued = service.issue_at("alice@example.com", t0()).unwrap();

        let last_valid = t0().plus_secs(DAY as i64 - 1).unwrap();
        assert!(service.verify_at(&issued.token, last_valid).is_ok());
    }

    #[test]
    fn token_is_invalid_at_and_after_expiry() {
        let service = service();
        let issued = service.issue_at("alice@example.com", t0()).unwrap();

        assert_eq!(
            service.verify_at(&issued.token, issued.expires_at),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            service.verify_at(&issued.token, issued.expires_at.plus_secs(1).unwrap()),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn long_expired_token_is_rejected_against_real_clock() {
        let service = service();
        let issued = service.issue_at("alice@example.com", t0()).unwrap();
        assert_eq!(service.verify(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn unrepresentable_expiry_is_an_error_not_a_panic() {
        let service = JwtTokenService::new(
            Secret::new(SECRET.to_string()),
            Duration::from_secs(u64::MAX),
        );

        let result = service.issue("alice@example.com");

        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Forgery
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtTokenService::new(
            Secret::new("another-secret-entirely-0123456789abcdef".to_string()),
            Duration::from_secs(DAY),
        );
        let issued = other.issue("alice@example.com").unwrap();

        assert_eq!(service().verify(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let service = service();
        let alice = service.issue("alice@example.com").unwrap().token;
        let mallory = service.issue("mallory@example.com").unwrap().token;

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", alice_parts[0], mallory_parts[1], alice_parts[2]);

        assert_eq!(service.verify(&forged), Err(AuthError::InvalidToken));
    }

    #[test]
    fn malformed_tokens_are_rejected_uniformly() {
        let service = service();
        for token in ["", "garbage", "a.b", "a.b.c", "..."] {
            assert_eq!(service.verify(token), Err(AuthError::InvalidToken), "{:?}", token);
        }
    }

    #[test]
    fn unsigned_token_is_rejected() {
        let service = service();
        let issued = service.issue("alice@example.com").unwrap().token;
        let mut parts = issued.split('.');
        let (header, payload) = (parts.next().unwrap(), parts.next().unwrap());

        assert_eq!(
            service.verify(&format!("{}.{}.", header, payload)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn debug_output_hides_keys() {
        let printed = format!("{:?}", service());
        assert!(!printed.contains(SECRET));
    }
}
