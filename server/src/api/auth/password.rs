//! Salted password hashing
//!
//! Stored form: `pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`.

use thiserror::Error;

use crate::core::constants::{PASSWORD_HASH_ITERATIONS, PASSWORD_SALT_LEN};
use crate::utils::crypto;

const SCHEME: &str = "pbkdf2-sha256";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Unsupported password hash scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Malformed password hash")]
    Malformed,
}

pub fn hash_password(password: &str) -> String {
    let salt = crypto::generate_key(PASSWORD_SALT_LEN);
    encode(password, &salt, PASSWORD_HASH_ITERATIONS)
}

fn encode(password: &str, salt: &[u8], iterations: u32) -> String {
    let hash = crypto::pbkdf2_sha256(password.as_bytes(), salt, iterations);
    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(hash)
    )
}

/// Check `password` against a stored hash in constant time
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordError::Malformed);
    };

    if scheme != SCHEME {
        return Err(PasswordError::UnsupportedScheme(scheme.to_string()));
    }
    let iterations: u32 = iterations.parse().map_err(|_| PasswordError::Malformed)?;
    if iterations == 0 {
        return Err(PasswordError::Malformed);
    }
    let salt = hex::decode(salt).map_err(|_| PasswordError::Malformed)?;
    let expected = hex::decode(hash).map_err(|_| PasswordError::Malformed)?;

    let actual = crypto::pbkdf2_sha256(password.as_bytes(), &salt, iterations);
    Ok(crypto::constant_time_eq(&actual, &expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("hunter2");
        assert!(stored.starts_with("pbkdf2-sha256$"));
        assert_eq!(verify_password("hunter2", &stored), Ok(true));
        assert_eq!(verify_password("hunter3", &stored), Ok(false));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_known_encoding() {
        let stored = encode("password", b"salt", 1);
        assert_eq!(
            stored,
            "pbkdf2-sha256$1$73616c74$120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(verify_password("password", &stored), Ok(true));
    }

    #[test]
    fn test_malformed_hashes() {
        assert_eq!(
            verify_password("x", "plaintext"),
            Err(PasswordError::Malformed)
        );
        assert_eq!(
            verify_password("x", "bcrypt$10$aa$bb"),
            Err(PasswordError::UnsupportedScheme("bcrypt".to_string()))
        );
        assert_eq!(
            verify_password("x", "pbkdf2-sha256$0$aa$bb"),
            Err(PasswordError::Malformed)
        );
        assert_eq!(
            verify_password("x", "pbkdf2-sha256$1$zz$bb"),
            Err(PasswordError::Malformed)
        );
        assert_eq!(
            verify_password("x", "pbkdf2-sha256$1$aa$bb$cc"),
            Err(PasswordError::Malformed)
        );
    }
}
