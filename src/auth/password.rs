//! Salted password digests
//!
//! Passwords are stored as `salt$digest`, where the digest is an
//! HMAC-SHA-256 of the password keyed by a random per-account salt,
//! base64-encoded. The raw password is never persisted.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Failures while hashing or verifying a password
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The stored digest is not in the `salt$digest` shape
    #[error("malformed password digest")]
    Malformed,

    /// The digest primitive rejected its inputs
    #[error("failed to compute digest: {0}")]
    Digest(String),
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_with_salt(&salt, password)?;
    Ok(format!("{salt}${digest}"))
}

/// Check a password against a stored `salt$digest` value.
///
/// The comparison runs through the MAC's own verifier, which is
/// constant-time.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let (salt, expected_b64) = stored.split_once('$').ok_or(PasswordError::Malformed)?;
    let expected = STANDARD
        .decode(expected_b64)
        .map_err(|_| PasswordError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|e| PasswordError::Digest(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(mac.verify_slice(&expected).is_ok())
}

fn digest_with_salt(salt: &str, password: &str) -> Result<String, PasswordError> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|e| PasswordError::Digest(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_password_verifies() {
        let stored = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &stored).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let stored = hash_password("hunter2hunter2").unwrap();
        assert!(!verify_password("not-the-password", &stored).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("hunter2hunter2").unwrap();
        let b = hash_password("hunter2hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_does_not_contain_password() {
        let stored = hash_password("hunter2hunter2").unwrap();
        assert!(!stored.contains("hunter2"));
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        assert!(matches!(
            verify_password("whatever", "no-separator-here"),
            Err(PasswordError::Malformed)
        ));
        assert!(matches!(
            verify_password("whatever", "salt$not!base64!!"),
            Err(PasswordError::Malformed)
        ));
    }
}
