//! JWT access token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT creation or validation error
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Access token has expired")]
    Expired,
    #[error("Invalid access token signature")]
    InvalidSignature,
    #[error("Access token subject is not a user id: {0}")]
    InvalidSubject(String),
    #[error("Invalid access token: {0}")]
    Invalid(String),
    #[error("Failed to create access token: {0}")]
    Encode(String),
}

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(user_id: i64, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidSubject(self.sub.clone()))
    }
}

/// Create a signed HS256 access token
pub fn create_access_token(
    signing_key: &[u8],
    user_id: i64,
    ttl: Duration,
) -> Result<String, JwtError> {
    let claims = AccessClaims::new(user_id, ttl);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| JwtError::Encode(e.to_string()))
}

/// Validate and decode an access token
pub fn validate_access_token(token: &str, signing_key: &[u8]) -> Result<AccessClaims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data =
        decode::<AccessClaims>(token, &DecodingKey::from_secret(signing_key), &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Invalid(e.to_string()),
            })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Vec<u8> {
        b"test-signing-key".to_vec()
    }

    #[test]
    fn test_create_and_validate() {
        let key = test_key();
        let token = create_access_token(&key, 42, Duration::hours(6)).unwrap();
        let claims = validate_access_token(&token, &key).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 6 * 3600);
    }

    #[test]
    fn test_invalid_signature() {
        let token = create_access_token(b"key-one", 1, Duration::hours(1)).unwrap();
        assert!(matches!(
            validate_access_token(&token, b"key-two"),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let key = test_key();
        let token = create_access_token(&key, 1, Duration::hours(-1)).unwrap();
        assert!(matches!(
            validate_access_token(&token, &key),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            validate_access_token("not.a.jwt", &test_key()),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = AccessClaims {
            sub: "admin".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(matches!(claims.user_id(), Err(JwtError::InvalidSubject(_))));
    }
}
