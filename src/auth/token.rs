//! Signed, time-limited bearer credentials
//!
//! Tokens are HS256 JWTs whose only identity claim is `sub`, the
//! customer's lowercased email. Validity defaults to 24 hours.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token validity: 24 hours
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// JWT claims carried by a bearer credential
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Customer identity (lowercased email); the only identity claim
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Failures while issuing or verifying a token
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies bearer credentials with a shared secret
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a token for an identity with the configured validity
    pub fn issue(&self, identity: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(identity, self.ttl_secs)
    }

    /// Issue a token with an explicit TTL in seconds.
    ///
    /// A non-positive TTL produces an already-expired token; tests use this
    /// to exercise expiry handling.
    pub fn issue_with_ttl(&self, identity: &str, ttl_secs: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Verify a token and return the identity it asserts
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", DEFAULT_TOKEN_TTL_SECS)
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let token = issuer().issue("maya@example.com").unwrap();
        let identity = issuer().verify(&token).unwrap();
        assert_eq!(identity, "maya@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issuer().issue_with_ttl("maya@example.com", -3600).unwrap();
        assert!(matches!(issuer().verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issuer().issue("maya@example.com").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');
        assert!(matches!(
            issuer().verify(&tampered),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer().issue("maya@example.com").unwrap();
        let other = TokenIssuer::new("different-secret", DEFAULT_TOKEN_TTL_SECS);
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            issuer().verify("not-a-jwt"),
            Err(TokenError::Invalid(_))
        ));
    }
}
