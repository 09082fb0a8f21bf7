//! Authentication manager

use chrono::Duration;

use super::jwt::{JwtError, create_access_token, validate_access_token};
use crate::core::AuthConfig;

/// Issues and validates access tokens with the configured secret
pub struct AuthManager {
    signing_key: Vec<u8>,
    token_ttl: Duration,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let hours = i64::try_from(config.token_ttl_hours).unwrap_or(i64::MAX / 3600);
        if config.uses_default_secret() {
            tracing::warn!("Using the built-in development JWT secret; set RECIPEBOX_JWT_SECRET");
        }
        tracing::debug!(ttl_hours = hours, "Authentication initialized");
        Self {
            signing_key: config.jwt_secret.as_bytes().to_vec(),
            token_ttl: Duration::hours(hours),
        }
    }

    pub fn issue_token(&self, user_id: i64) -> Result<String, JwtError> {
        create_access_token(&self.signing_key, user_id, self.token_ttl)
    }

    /// Validate a bearer token and return the user id it was issued for
    pub fn validate_token(&self, jwt: &str) -> Result<i64, JwtError> {
        validate_access_token(jwt, &self.signing_key)?.user_id()
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 6,
        }
    }

    #[test]
    fn test_round_trip_user_id() {
        let manager = AuthManager::new(&config("s3cret"));
        let token = manager.issue_token(17).unwrap();
        assert_eq!(manager.validate_token(&token).unwrap(), 17);
    }

    #[test]
    fn test_other_secret_rejected() {
        let issuer = AuthManager::new(&config("one"));
        let verifier = AuthManager::new(&config("two"));
        let token = issuer.issue_token(1).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
